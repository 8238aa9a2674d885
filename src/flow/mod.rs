//! Curved flow arrows
//!
//! Each arrow is a quadratic bezier arcing over the chord between two
//! reservoirs, with a cone at the midpoint and a label revealed on hover.

mod arrow;
mod label;

pub use arrow::{ArrowParams, FlowArrow};
pub use label::{LabelLayout, LabelLine, LabelPose, Viewpoint};
