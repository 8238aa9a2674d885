pub mod vec3;
pub mod quat;
pub mod bezier;

pub use vec3::Vec3;
pub use quat::{Quat, orientation_from_direction, billboard_orientation};
pub use bezier::{bezier_point, sample_path};
