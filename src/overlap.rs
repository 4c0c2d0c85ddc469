// Overlap detection over ordered label sequences. Builds one oriented
// collision rectangle per label from its unrotated measurement, margin and
// anchor conventions, then tests adjacent pairs.

use crate::collision::CollisionRect;
use crate::label::{Label, Margin, TextAlign, TextBaseline};
use crate::text_metrics::TextMeasurer;

const LINE_HEIGHT: f64 = 1.2;

/// Measure a label's glyph box with rotation ignored. Rotation must never
/// distort size measurement; the rotated box is the same rigid rectangle.
/// Pure: the label is not touched.
pub fn measure_unrotated(label: &Label, measurer: &dyn TextMeasurer) -> (f64, f64) {
    let mut width = 0.0f64;
    let mut lines = 0usize;
    for line in label.text.split('\n') {
        lines += 1;
        let line_width = measurer.measure(line, label.font_size, &label.font_family);
        if line_width > width {
            width = line_width;
        }
    }
    let height = lines.max(1) as f64 * label.font_size * LINE_HEIGHT;
    (width, height)
}

/// Oriented collision rectangle for a label with the given margin applied.
///
/// The label's nominal `(x, y)` is its text anchor, not the box center:
/// `text_align` places the anchor on the left edge, midpoint or right edge
/// of the glyph box, and `text_baseline` does the same vertically. The box
/// center is derived from that anchor offset and rotated about the anchor
/// by the label's rotation.
pub fn collision_rect(label: &Label, measurer: &dyn TextMeasurer, margin: Margin) -> CollisionRect {
    let (width, height) = measure_unrotated(label, measurer);
    let total_w = width + margin.left + margin.right;
    let total_h = height + margin.top + margin.bottom;

    // Box left/top edge relative to the anchor, before rotation.
    let left = match label.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -width / 2.0,
        TextAlign::Right => -width,
    } - margin.left;
    let top = match label.baseline {
        TextBaseline::Top => 0.0,
        TextBaseline::Middle => -height / 2.0,
        TextBaseline::Bottom => -height,
    } - margin.top;

    let offset_x = left + total_w / 2.0;
    let offset_y = top + total_h / 2.0;
    let (sin, cos) = label.rotation.to_radians().sin_cos();
    let center = (
        label.x + offset_x * cos - offset_y * sin,
        label.y + offset_x * sin + offset_y * cos,
    );
    CollisionRect::new(center, total_w, total_h, label.rotation)
}

/// Whether any adjacent pair in the ordered sequence collides.
///
/// Only adjacency is checked, not all pairs: labels are assumed to be
/// spatially ordered along their axis, which makes non-adjacent overlap
/// either impossible or ignorable. Sequences of length <= 1 never overlap.
pub fn has_overlap(labels: &[Label], measurer: &dyn TextMeasurer, margin: Margin) -> bool {
    if labels.len() <= 1 {
        return false;
    }
    let rects: Vec<CollisionRect> = labels
        .iter()
        .map(|label| collision_rect(label, measurer, margin))
        .collect();
    has_overlap_rects(&rects)
}

/// Adjacent-pair test over pre-built rectangles. Used by resolvers that
/// restrict the check to still-visible labels.
pub fn has_overlap_rects(rects: &[CollisionRect]) -> bool {
    rects
        .windows(2)
        .any(|pair| pair[0].is_collision(&pair[1]))
}
