use crate::flow::{FlowArrow, Viewpoint};
use crate::math::Vec3;

/// Information about a ray-arrow intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub arrow_index: usize,
    /// Distance along the ray to the closest approach
    pub distance: f32,
    pub hit_point: Vec3,
}

/// Ray-based picking for hovering arrow paths
pub struct ArrowPicker {
    /// Max distance between ray and path that still counts as a hit
    pub pick_radius: f32,
}

impl ArrowPicker {
    pub fn new(pick_radius: f32) -> Self {
        Self { pick_radius }
    }

    /// Cast a ray from normalized device coordinates and find the closest
    /// arrow whose sampled path passes within `pick_radius` of it
    pub fn pick<'a, I>(&self, ndc_x: f32, ndc_y: f32, viewpoint: &Viewpoint, arrows: I) -> Option<HitInfo>
    where
        I: IntoIterator<Item = &'a FlowArrow>,
    {
        let origin = viewpoint.position;
        let ray_dir = screen_to_world_ray(ndc_x, ndc_y, viewpoint)?;

        let mut closest: Option<HitInfo> = None;

        for (index, arrow) in arrows.into_iter().enumerate() {
            for segment in arrow.curve_points().windows(2) {
                let Some((t, gap)) = ray_segment_distance(origin, ray_dir, segment[0], segment[1]) else {
                    continue;
                };
                if gap > self.pick_radius {
                    continue;
                }
                if closest.map_or(true, |hit| t < hit.distance) {
                    closest = Some(HitInfo {
                        arrow_index: index,
                        distance: t,
                        hit_point: origin + ray_dir.scale(t),
                    });
                }
            }
        }

        closest
    }
}

impl Default for ArrowPicker {
    fn default() -> Self {
        Self::new(0.15)
    }
}

/// World-space ray direction through a point on the near plane
fn screen_to_world_ray(ndc_x: f32, ndc_y: f32, viewpoint: &Viewpoint) -> Option<Vec3> {
    let forward = (viewpoint.target - viewpoint.position).normalize();
    if forward.length_squared() == 0.0 {
        return None;
    }

    let mut right = forward.cross(&Vec3::UP);
    if right.length_squared() < 1.0e-12 {
        right = Vec3::RIGHT;
    }
    let right = right.normalize();
    let up = right.cross(&forward);

    let half_height = (viewpoint.fov / 2.0).tan();
    let half_width = half_height * viewpoint.aspect;

    Some(
        (forward + right.scale(ndc_x * half_width) + up.scale(ndc_y * half_height)).normalize(),
    )
}

/// Closest approach between a ray and a segment.
/// Returns the ray parameter and the gap, or `None` if the closest point is behind the origin.
fn ray_segment_distance(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3) -> Option<(f32, f32)> {
    let seg = b - a;
    let w = origin - a;

    let dd = dir.dot(&dir);
    let ds = dir.dot(&seg);
    let ss = seg.dot(&seg);
    let dw = dir.dot(&w);
    let sw = seg.dot(&w);

    let denom = dd * ss - ds * ds;

    let mut s = if ss <= f32::EPSILON {
        0.0
    } else if denom.abs() <= f32::EPSILON {
        // Parallel: project the origin onto the segment
        (sw / ss).clamp(0.0, 1.0)
    } else {
        ((dd * sw - ds * dw) / denom).clamp(0.0, 1.0)
    };

    // Best ray parameter for that segment point, then re-fit the segment
    let mut t = (ds * s - dw) / dd;
    if t < 0.0 {
        t = 0.0;
        s = if ss <= f32::EPSILON { 0.0 } else { (sw / ss).clamp(0.0, 1.0) };
    }

    let on_ray = origin + dir.scale(t);
    let on_seg = a + seg.scale(s);
    let gap = on_ray.distance(&on_seg);

    if t <= 0.0 && (on_seg - origin).dot(&dir) < 0.0 {
        return None;
    }

    Some((t, gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::ArrowParams;

    fn front_view() -> Viewpoint {
        Viewpoint {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
        }
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let dir = screen_to_world_ray(0.0, 0.0, &front_view()).unwrap();
        assert!((dir.z + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_ray_segment_hit() {
        let (t, gap) = ray_segment_distance(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert!((t - 10.0).abs() < 0.001);
        assert!(gap < 0.001);
    }

    #[test]
    fn test_ray_segment_miss_to_the_side() {
        let (_, gap) = ray_segment_distance(
            Vec3::new(5.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert!((gap - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_segment_behind_camera_is_ignored() {
        let result = ray_segment_distance(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 20.0),
            Vec3::new(1.0, 0.0, 20.0),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_pick_arrow_through_midpoint() {
        let params = ArrowParams::default();
        let arrows = vec![
            FlowArrow::new(Vec3::new(-2.0, -1.0, 0.0), Vec3::new(2.0, -1.0, 0.0), "lime", None, &params),
            FlowArrow::new(Vec3::new(-2.0, -1.0, 5.0), Vec3::new(2.0, -1.0, 5.0), "red", None, &params),
        ];

        // Look straight at the first arrow's midpoint
        let view = Viewpoint {
            position: Vec3::new(0.0, arrows[0].midpoint().y, -10.0),
            target: arrows[0].midpoint(),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
        };

        let hit = ArrowPicker::default().pick(0.0, 0.0, &view, &arrows).unwrap();
        assert_eq!(hit.arrow_index, 0);
        assert!((hit.distance - 10.0).abs() < 0.05);
    }

    #[test]
    fn test_pick_nothing() {
        let params = ArrowParams::default();
        let arrows = vec![FlowArrow::new(Vec3::new(-2.0, -1.0, 0.0), Vec3::new(2.0, -1.0, 0.0), "lime", None, &params)];
        assert!(ArrowPicker::default().pick(0.9, 0.9, &front_view(), &arrows).is_none());
    }
}
