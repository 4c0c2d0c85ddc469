// Label descriptors consumed by the overlap detector and resolvers.
// The label itself belongs to the chart component; this core only reads its
// geometry and writes visibility, rotation and displayed text.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Symmetric padding added around a box before collision testing,
/// in CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const ZERO: Margin = Margin {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl From<[f64; 4]> for Margin {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// What the label's text represents. Ellipsis resolution picks its
/// truncation policy from this, once per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelContent {
    Text,
    Number(f64),
    Time(NaiveDateTime),
}

#[derive(Debug, Clone)]
pub struct Label {
    /// Nominal anchor position. This is generally not the geometric center
    /// of the glyph box; alignment and baseline determine the offset.
    pub x: f64,
    pub y: f64,
    /// Counter-clockwise rotation in degrees about the anchor.
    pub rotation: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub visibility: Visibility,
    pub font_size: f64,
    pub font_family: String,
    /// Currently displayed (possibly truncated) text.
    pub text: String,
    /// The untruncated source text. Resolvers always re-truncate from this,
    /// never from `text`.
    pub origin_text: String,
    pub content: LabelContent,
}

const DEFAULT_FONT_SIZE: f64 = 12.0;
const DEFAULT_FONT_FAMILY: &str = "sans-serif";

impl Label {
    pub fn text(origin: impl Into<String>, x: f64, y: f64) -> Self {
        let origin = origin.into();
        Self {
            x,
            y,
            rotation: 0.0,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            visibility: Visibility::Visible,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            text: origin.clone(),
            origin_text: origin,
            content: LabelContent::Text,
        }
    }

    pub fn number(value: f64, x: f64, y: f64) -> Self {
        let mut label = Self::text(crate::resolve::group_thousands(value), x, y);
        label.content = LabelContent::Number(value);
        label
    }

    pub fn time(value: NaiveDateTime, x: f64, y: f64) -> Self {
        let mut label = Self::text(value.format("%Y-%m-%d %H:%M:%S").to_string(), x, y);
        label.content = LabelContent::Time(value);
        label
    }

    pub fn with_font(mut self, size: f64, family: impl Into<String>) -> Self {
        self.font_size = size;
        self.font_family = family.into();
        self
    }

    pub fn with_anchor(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}
