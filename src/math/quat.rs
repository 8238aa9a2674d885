use serde::{Serialize, Deserialize};
use super::Vec3;

/// Below this squared length a direction is treated as degenerate
pub const DIRECTION_EPSILON: f32 = 1.0e-12;

/// Unit quaternion for orienting arrowheads and labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`.
    /// Opposite vectors rotate half a turn about an axis orthogonal to `from`.
    pub fn from_unit_vectors(from: Vec3, to: Vec3) -> Self {
        let r = from.dot(&to) + 1.0;

        let q = if r < 1.0e-6 {
            if from.x.abs() > from.z.abs() {
                Quat::new(-from.y, from.x, 0.0, 0.0)
            } else {
                Quat::new(0.0, -from.z, from.y, 0.0)
            }
        } else {
            let axis = from.cross(&to);
            Quat::new(axis.x, axis.y, axis.z, r)
        };

        q.normalize()
    }

    /// Rotation whose local X, Y and Z axes land on `right`, `up` and `back`.
    /// The three vectors must form an orthonormal right-handed basis.
    pub fn from_basis(right: Vec3, up: Vec3, back: Vec3) -> Self {
        let (m00, m01, m02) = (right.x, up.x, back.x);
        let (m10, m11, m12) = (right.y, up.y, back.y);
        let (m20, m21, m22) = (right.z, up.z, back.z);

        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Quat::new((m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s, 0.25 / s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Quat::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Quat::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Quat::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };

        q.normalize()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Quat::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::IDENTITY
        }
    }

    /// Apply the rotation to a vector
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(&v).scale(2.0);
        v + t.scale(self.w) + q.cross(&t)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

/// Rotation mapping the canonical up axis onto `dir`.
///
/// Cones and cylinders are modelled along +Y, so this is what lines them up
/// with an arbitrary direction. Returns `None` for a zero-length direction;
/// callers pick their own fallback.
pub fn orientation_from_direction(dir: Vec3) -> Option<Quat> {
    if dir.length_squared() <= DIRECTION_EPSILON || !dir.is_finite() {
        return None;
    }
    Some(Quat::from_unit_vectors(Vec3::UP, dir.normalize()))
}

/// Camera-facing rotation for a flat element: local +Z points back at the
/// camera and local +Y stays as close to world up as the view allows.
pub fn billboard_orientation(camera_position: Vec3, camera_target: Vec3) -> Quat {
    let back = (camera_position - camera_target).normalize();
    if back.length_squared() <= DIRECTION_EPSILON {
        return Quat::IDENTITY;
    }

    let mut right = Vec3::UP.cross(&back);
    if right.length_squared() <= DIRECTION_EPSILON {
        // Looking straight up or down
        right = Vec3::RIGHT;
    }
    let right = right.normalize();
    let up = back.cross(&right);

    Quat::from_basis(right, up, back)
}
