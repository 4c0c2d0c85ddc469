pub mod bounds;
pub mod collision;
pub mod constraint;
pub mod error;
pub mod label;
pub mod overlap;
pub mod resolve;
pub mod text_metrics;

pub use bounds::{Bounds, Edge};
pub use collision::{CollisionRect, line_to_line};
pub use constraint::{ConstraintSolver, Op, Term};
pub use error::LayoutError;
pub use label::{Label, LabelContent, Margin, TextAlign, TextBaseline, Visibility};
pub use overlap::{collision_rect, has_overlap, measure_unrotated};
pub use resolve::{
    AxisSide, EllipsisOptions, EllipsisStep, HideMethod, HideOptions, ResolveOptions,
    RotateOptions, auto_ellipsis, auto_hide, auto_rotate, resolve_overlaps,
};
pub use text_metrics::{FixedWidthMeasurer, FontMeasurer, TextMeasurer, measure_text_width};
