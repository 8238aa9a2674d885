use serde::Serialize;
use crate::agents::Bounds;
use crate::math::Vec3;

/// Distance between fence posts
pub const POST_SPACING: f32 = 0.5;
const TOP_RAIL_HEIGHT: f32 = 0.2;
const BOTTOM_RAIL_HEIGHT: f32 = 0.05;

/// A straight run of posts with a top and bottom rail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fence {
    pub start: Vec3,
    pub length: f32,
    /// Rotation about Y applied to the +X run direction
    pub rotation_y: f32,
}

/// Horizontal rail, described by its center and length along the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rail {
    pub center: Vec3,
    pub length: f32,
}

impl Fence {
    pub fn new(start: Vec3, length: f32, rotation_y: f32) -> Self {
        Self { start, length, rotation_y }
    }

    /// Unit vector the fence runs along
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.rotation_y.cos(), 0.0, -self.rotation_y.sin())
    }

    pub fn post_count(&self) -> usize {
        (self.length.max(0.0) / POST_SPACING).floor() as usize + 1
    }

    /// World positions of the posts, starting at `start`
    pub fn posts(&self) -> Vec<Vec3> {
        let dir = self.direction();
        (0..self.post_count())
            .map(|i| self.start + dir.scale(i as f32 * POST_SPACING))
            .collect()
    }

    pub fn rails(&self) -> [Rail; 2] {
        let middle = self.start + self.direction().scale(self.length / 2.0);
        [
            Rail {
                center: middle + Vec3::new(0.0, TOP_RAIL_HEIGHT, 0.0),
                length: self.length,
            },
            Rail {
                center: middle + Vec3::new(0.0, BOTTOM_RAIL_HEIGHT, 0.0),
                length: self.length,
            },
        ]
    }

    /// Four runs enclosing `bounds` at ground height `y`
    pub fn around(bounds: &Bounds, y: f32) -> Vec<Fence> {
        let along_z = -std::f32::consts::FRAC_PI_2;
        vec![
            Fence::new(Vec3::new(bounds.x_min, y, bounds.z_min), bounds.width(), 0.0),
            Fence::new(Vec3::new(bounds.x_min, y, bounds.z_max), bounds.width(), 0.0),
            Fence::new(Vec3::new(bounds.x_min, y, bounds.z_min), bounds.depth(), along_z),
            Fence::new(Vec3::new(bounds.x_max, y, bounds.z_min), bounds.depth(), along_z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_count() {
        assert_eq!(Fence::new(Vec3::ZERO, 1.0, 0.0).post_count(), 3);
        assert_eq!(Fence::new(Vec3::ZERO, 2.6, 0.0).post_count(), 6);
        assert_eq!(Fence::new(Vec3::ZERO, 0.2, 0.0).post_count(), 1);
    }

    #[test]
    fn test_posts_follow_rotation() {
        let fence = Fence::new(Vec3::new(1.0, -1.0, 0.0), 1.0, -std::f32::consts::FRAC_PI_2);
        let posts = fence.posts();
        let last = posts.last().unwrap();
        assert!((last.x - 1.0).abs() < 0.0001);
        assert!((last.z - 1.0).abs() < 0.0001);
        assert_eq!(last.y, -1.0);
    }

    #[test]
    fn test_rails_centered() {
        let [top, bottom] = Fence::new(Vec3::ZERO, 2.0, 0.0).rails();
        assert!((top.center.x - 1.0).abs() < 0.0001);
        assert!((top.center.y - 0.2).abs() < 0.0001);
        assert!((bottom.center.y - 0.05).abs() < 0.0001);
        assert_eq!(top.length, 2.0);
    }

    #[test]
    fn test_fence_around_bounds() {
        let bounds = Bounds::new(0.2, 2.8, -4.3, -1.7);
        let fences = Fence::around(&bounds, -1.0);
        assert_eq!(fences.len(), 4);

        // East run ends at the far corner
        let east_end = *fences[3].posts().last().unwrap();
        assert!((east_end.x - 2.8).abs() < 0.0001);
        assert!(east_end.z <= bounds.z_max + 0.0001);
    }
}
