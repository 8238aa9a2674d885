use super::Vec3;

/// Point on the quadratic bezier through `p0` and `p2` with control `p1`.
///
/// Endpoints are exact: `t = 0` returns `p0` and `t = 1` returns `p2`
/// bit for bit, so sampled paths always meet their reservoirs.
pub fn bezier_point(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    if t <= 0.0 {
        return p0;
    }
    if t >= 1.0 {
        return p2;
    }

    let u = 1.0 - t;
    let b0 = u * u;
    let b1 = 2.0 * u * t;
    let b2 = t * t;

    p0.scale(b0) + p1.scale(b1) + p2.scale(b2)
}

/// Sample `resolution + 1` evenly spaced points along the curve, first and
/// last equal to the endpoints. A resolution of zero yields just `p0`.
pub fn sample_path(p0: Vec3, p1: Vec3, p2: Vec3, resolution: usize) -> Vec<Vec3> {
    if resolution == 0 {
        return vec![p0];
    }
    (0..=resolution)
        .map(|i| bezier_point(p0, p1, p2, i as f32 / resolution as f32))
        .collect()
}
