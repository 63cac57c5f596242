use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position or direction in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Length (magnitude) of the vector
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Vec3) -> f64 {
        (*self - *other).length()
    }

    /// Same direction scaled to `length`. A zero vector stays zero.
    pub fn with_length(&self, length: f64) -> Vec3 {
        let current = self.length();
        if current <= f64::EPSILON {
            return Vec3::ZERO;
        }
        let k = length / current;
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Rotation quaternion as stored on world entities.
///
/// Components are kept as given; the host does not guarantee unit length.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const ZERO: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around the vertical axis
    pub fn from_yaw(angle: f64) -> Self {
        let half = angle / 2.0;
        Self::new(0.0, half.sin(), 0.0, half.cos())
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0 && self.w == 0.0
    }

    /// Yaw (rotation about Y) of the Euler decomposition in YXZ order.
    ///
    /// Builds the rotation matrix straight from the components, so the zero
    /// quaternion maps to the identity and yields a yaw of 0.
    pub fn yaw_yxz(&self) -> f64 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xz) = (x * x2, x * z2);
        let (yy, yz) = (y * y2, y * z2);
        let zz = z * z2;
        let (wx, wy) = (w * x2, w * y2);

        let m11 = 1.0 - (yy + zz);
        let m13 = xz + wy;
        let m23 = yz - wx;
        let m31 = xz - wy;
        let m33 = 1.0 - (xx + yy);

        // Gimbal lock: pitch at +-90 degrees folds roll into yaw
        if m23.clamp(-1.0, 1.0).abs() < 0.9999999 {
            m13.atan2(m33)
        } else {
            (-m31).atan2(m11)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance_to() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_with_length_keeps_direction() {
        let v = Vec3::new(0.0, 0.0, -3.0).with_length(2.0);
        assert!((v.z + 2.0).abs() < EPS);
        assert_eq!(Vec3::ZERO.with_length(5.0), Vec3::ZERO);
    }

    #[test]
    fn test_up_cross_forward_points_sideways() {
        let side = Vec3::UP.cross(&Vec3::new(0.0, 0.0, -1.0));
        assert!((side.x + 1.0).abs() < EPS);
        assert!(side.y.abs() < EPS && side.z.abs() < EPS);
    }

    #[test]
    fn test_zero_quaternion_has_zero_yaw() {
        assert_eq!(Quat::ZERO.yaw_yxz(), 0.0);
    }

    #[test]
    fn test_pure_yaw_round_trips() {
        for angle in [0.3, FRAC_PI_2, -1.2, 2.5] {
            let yaw = Quat::from_yaw(angle).yaw_yxz();
            assert!((yaw - angle).abs() < 1e-6, "angle {angle} gave {yaw}");
        }
    }

    #[test]
    fn test_half_turn_yaw() {
        let yaw = Quat::new(0.0, 1.0, 0.0, 0.0).yaw_yxz();
        assert!((yaw.abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_roll_does_not_leak_into_yaw() {
        // 90 degrees about Z only
        let half = FRAC_PI_2 / 2.0;
        let q = Quat::new(0.0, 0.0, half.sin(), half.cos());
        assert!(q.yaw_yxz().abs() < 1e-9);
    }
}
