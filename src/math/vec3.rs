use std::ops::{Add, AddAssign, Neg, Sub};
use serde::{Serialize, Deserialize};

/// World-space point or direction. Y is up; the ground sits at y = -1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// +Z, the direction a flat label faces before rotation
    pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction; zero stays zero
    pub fn normalize(&self) -> Self {
        match self.length() {
            len if len > 0.0 => self.scale(1.0 / len),
            _ => *self,
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn scale(&self, s: f32) -> Self {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        assert!((Vec3::new(3.0, 4.0, 0.0).length() - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_normalize() {
        let n = Vec3::new(0.0, 0.0, -2.0).normalize();
        assert!((n.length() - 1.0).abs() < 0.0001);
        assert!((n.z + 1.0).abs() < 0.0001);
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_right_cross_up_is_forward() {
        let c = Vec3::RIGHT.cross(&Vec3::UP);
        assert!(c.distance(&Vec3::FORWARD) < 0.0001);
    }

    #[test]
    fn test_step_accumulates() {
        let mut p = Vec3::new(1.0, -0.85, -3.0);
        p += Vec3::new(0.5, 0.0, -0.25);
        assert_eq!(p, Vec3::new(1.5, -0.85, -3.25));
        assert_eq!((p - Vec3::new(1.5, 0.0, 0.0)).x, 0.0);
    }

    #[test]
    fn test_from_array() {
        let v: Vec3 = [1.5, -0.85, -3.0].into();
        assert_eq!(v.to_array(), [1.5, -0.85, -3.0]);
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
    }
}
