pub mod picking;
pub mod hover;

pub use picking::{ArrowPicker, HitInfo};
pub use hover::{HoverEvent, HoverTracker};
