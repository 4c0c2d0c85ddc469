// Overlap resolution strategies over ordered label sequences. Each strategy
// mutates label visual state in place (visibility, rotation, displayed text)
// until no adjacent overlap remains or its budget runs out.

mod ellipsis;
mod hide;
mod rotate;

pub use ellipsis::{
    EllipsisOptions, EllipsisStep, auto_ellipsis, group_thousands, magnitude_notation,
    scientific_notation, truncate_text,
};
pub use hide::{HideMethod, HideOptions, auto_hide};
pub use rotate::{AxisSide, RotateOptions, auto_rotate, orientation_for};

use serde::{Deserialize, Serialize};

use crate::label::{Label, Margin};
use crate::overlap::has_overlap;
use crate::text_metrics::TextMeasurer;

/// Combined configuration for a full resolution pass. Strategies run in a
/// fixed priority order and only when enabled: rotate first (keeps every
/// label intact), then ellipsis (shortens text), then hide (drops labels as
/// the last resort).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub margin: Margin,
    pub rotate: Option<RotateOptions>,
    pub ellipsis: Option<EllipsisOptions>,
    pub hide: Option<HideOptions>,
}

pub fn resolve_overlaps(
    labels: &mut [Label],
    measurer: &dyn TextMeasurer,
    options: &ResolveOptions,
) {
    if let Some(rotate) = &options.rotate {
        if !has_overlap(labels, measurer, options.margin) {
            return;
        }
        auto_rotate(labels, measurer, options.margin, rotate);
    }
    if let Some(ellipsis) = &options.ellipsis {
        if !has_overlap(labels, measurer, options.margin) {
            return;
        }
        auto_ellipsis(labels, measurer, options.margin, ellipsis);
    }
    if let Some(hide) = &options.hide {
        if !has_overlap(labels, measurer, options.margin) {
            return;
        }
        auto_hide(labels, measurer, options.margin, hide);
    }
}
