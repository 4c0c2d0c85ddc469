// Axis-aligned bounds for layout boxes, before any rotation is applied.
// Edges may be left undefined to mean "no limit on this side"; undefined
// edges read back as +/- infinity so clamping math stays total.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    left: Option<f64>,
    top: Option<f64>,
    right: Option<f64>,
    bottom: Option<f64>,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
        }
    }

    /// Bounds with any subset of edges supplied. Missing edges are open.
    pub fn from_edges(
        left: Option<f64>,
        top: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
    ) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn left(&self) -> f64 {
        self.left.unwrap_or(f64::NEG_INFINITY)
    }

    pub fn top(&self) -> f64 {
        self.top.unwrap_or(f64::NEG_INFINITY)
    }

    pub fn right(&self) -> f64 {
        self.right.unwrap_or(f64::INFINITY)
    }

    pub fn bottom(&self) -> f64 {
        self.bottom.unwrap_or(f64::INFINITY)
    }

    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Whether the given edge was explicitly supplied. Consumers treat an
    /// undefined edge as "no limit on this side".
    pub fn defined(&self, edge: Edge) -> bool {
        match edge {
            Edge::Left => self.left.is_some(),
            Edge::Top => self.top.is_some(),
            Edge::Right => self.right.is_some(),
            Edge::Bottom => self.bottom.is_some(),
        }
    }

    /// Replace all four edges at once.
    pub fn set(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.left = Some(left);
        self.top = Some(top);
        self.right = Some(right);
        self.bottom = Some(bottom);
    }
}
