// AutoRotate: sweep an ordered list of candidate angles, re-anchoring the
// text for each, and keep the first angle that removes all adjacent overlap.

use serde::{Deserialize, Serialize};

use crate::label::{Label, Margin, TextAlign, TextBaseline};
use crate::overlap::has_overlap;
use crate::text_metrics::TextMeasurer;

/// Below this magnitude a rotation still reads as horizontal and keeps the
/// straight-text anchor conventions.
const FLIP_THRESHOLD_DEG: f64 = 14.0;

/// Which side of the plot the axis sits on. Determines how rotated labels
/// are re-anchored so the text stays readably attached to its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    /// Candidate angles in degrees, tried in order.
    pub candidates: Vec<f64>,
    pub side: AxisSide,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            candidates: vec![0.0, 90.0],
            side: AxisSide::Bottom,
        }
    }
}

/// Anchor conventions for a label rotated by `angle` on the given axis side.
pub fn orientation_for(side: AxisSide, angle: f64) -> (TextAlign, TextBaseline) {
    if angle.abs() <= FLIP_THRESHOLD_DEG {
        return match side {
            AxisSide::Top => (TextAlign::Center, TextBaseline::Bottom),
            AxisSide::Bottom => (TextAlign::Center, TextBaseline::Top),
            AxisSide::Left => (TextAlign::Right, TextBaseline::Middle),
            AxisSide::Right => (TextAlign::Left, TextBaseline::Middle),
        };
    }
    // Steep rotation: anchor the end of the text nearest the axis line.
    match side {
        AxisSide::Bottom => {
            if angle > 0.0 {
                (TextAlign::Right, TextBaseline::Middle)
            } else {
                (TextAlign::Left, TextBaseline::Middle)
            }
        }
        AxisSide::Top => {
            if angle > 0.0 {
                (TextAlign::Left, TextBaseline::Middle)
            } else {
                (TextAlign::Right, TextBaseline::Middle)
            }
        }
        AxisSide::Left => {
            if angle > 0.0 {
                (TextAlign::Center, TextBaseline::Bottom)
            } else {
                (TextAlign::Center, TextBaseline::Top)
            }
        }
        AxisSide::Right => {
            if angle > 0.0 {
                (TextAlign::Center, TextBaseline::Top)
            } else {
                (TextAlign::Center, TextBaseline::Bottom)
            }
        }
    }
}

/// Try each candidate angle in order and stop at the first without overlap.
/// When no candidate succeeds the last one stays applied; the result is
/// best effort, not guaranteed overlap-free.
pub fn auto_rotate(
    labels: &mut [Label],
    measurer: &dyn TextMeasurer,
    margin: Margin,
    options: &RotateOptions,
) {
    for &angle in &options.candidates {
        let (align, baseline) = orientation_for(options.side, angle);
        for label in labels.iter_mut() {
            label.rotation = angle;
            label.align = align;
            label.baseline = baseline;
        }
        if !has_overlap(labels, measurer, margin) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_metrics::FixedWidthMeasurer;

    fn crowded(n: usize, spacing: f64, text: &str) -> Vec<Label> {
        (0..n)
            .map(|i| Label::text(text, i as f64 * spacing, 0.0))
            .collect()
    }

    #[test]
    fn keeps_zero_rotation_when_labels_fit() {
        let measurer = FixedWidthMeasurer::default();
        let mut labels = crowded(4, 60.0, "AAAA");
        auto_rotate(&mut labels, &measurer, Margin::ZERO, &RotateOptions::default());
        assert!(labels.iter().all(|l| l.rotation == 0.0));
        assert!(labels.iter().all(|l| l.align == TextAlign::Center));
    }

    #[test]
    fn rotates_to_quarter_turn_when_crowded() {
        let measurer = FixedWidthMeasurer::default();
        // 57.6px wide labels every 24px cannot fit horizontally, but their
        // 14.4px line height fits fine once vertical.
        let mut labels = crowded(5, 24.0, "AAAAAAAA");
        auto_rotate(&mut labels, &measurer, Margin::ZERO, &RotateOptions::default());
        assert!(labels.iter().all(|l| l.rotation == 90.0));
        assert!(labels.iter().all(|l| l.align == TextAlign::Right));
        assert!(!has_overlap(&labels, &measurer, Margin::ZERO));
    }

    #[test]
    fn last_candidate_stays_when_nothing_fits() {
        let measurer = FixedWidthMeasurer::default();
        let mut labels = crowded(5, 4.0, "AAAAAAAA");
        let options = RotateOptions {
            candidates: vec![0.0, 45.0, 90.0],
            side: AxisSide::Bottom,
        };
        auto_rotate(&mut labels, &measurer, Margin::ZERO, &options);
        assert!(labels.iter().all(|l| l.rotation == 90.0));
        assert!(has_overlap(&labels, &measurer, Margin::ZERO));
    }

    #[test]
    fn shallow_angles_keep_horizontal_anchoring() {
        assert_eq!(
            orientation_for(AxisSide::Bottom, 10.0),
            (TextAlign::Center, TextBaseline::Top)
        );
        assert_eq!(
            orientation_for(AxisSide::Bottom, -14.0),
            (TextAlign::Center, TextBaseline::Top)
        );
        assert_eq!(
            orientation_for(AxisSide::Bottom, 15.0),
            (TextAlign::Right, TextBaseline::Middle)
        );
        assert_eq!(
            orientation_for(AxisSide::Top, 45.0),
            (TextAlign::Left, TextBaseline::Middle)
        );
    }
}
