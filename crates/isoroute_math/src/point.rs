//! 3D point type
//!
//! Every point is quantized to 3 decimal places on construction so that
//! points derived through different arithmetic paths still compare equal.

use serde::{Deserialize, Serialize};

/// Round a coordinate to 3 decimal places.
///
/// All geometry in this crate passes through this before being compared,
/// hashed, or used as an identity component.
#[inline]
pub fn quantize(v: f64) -> f64 {
    let q = (v * 1000.0).round() / 1000.0;
    // Collapse -0.0 so formatted identities match
    if q == 0.0 {
        0.0
    } else {
        q
    }
}

/// A point in 3D world space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new point, quantized to 3 decimal places
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: quantize(x),
            y: quantize(y),
            z: quantize(z),
        }
    }

    /// Return this point displaced by the given deltas
    #[inline]
    pub fn translated(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Rotate about the X axis around `pivot` by `angle` radians (right-hand rule)
    pub fn rotated_x(self, pivot: Point3, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let y = self.y - pivot.y;
        let z = self.z - pivot.z;
        Self::new(
            self.x,
            pivot.y + y * cos - z * sin,
            pivot.z + y * sin + z * cos,
        )
    }

    /// Rotate about the Y axis around `pivot` by `angle` radians (right-hand rule)
    pub fn rotated_y(self, pivot: Point3, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let x = self.x - pivot.x;
        let z = self.z - pivot.z;
        Self::new(
            pivot.x + x * cos + z * sin,
            self.y,
            pivot.z - x * sin + z * cos,
        )
    }

    /// Rotate about the Z axis around `pivot` by `angle` radians (right-hand rule)
    pub fn rotated_z(self, pivot: Point3, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let x = self.x - pivot.x;
        let y = self.y - pivot.y;
        Self::new(
            pivot.x + x * cos - y * sin,
            pivot.y + x * sin + y * cos,
            self.z,
        )
    }
}

impl std::ops::Add for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, other: Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_on_construction() {
        let p = Point3::new(0.0004, 0.0005, -0.0004);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.001);
        assert!(p.z.is_sign_positive() && p.z == 0.0);
    }

    #[test]
    fn test_identical_after_different_arithmetic() {
        let a = Point3::new(0.1 + 0.2, 0.0, 0.0);
        let b = Point3::new(0.3, 0.0, 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_translated() {
        let p = Point3::new(1.0, 2.0, 3.0).translated(1.0, -2.0, 0.5);
        assert_eq!(p, Point3::new(2.0, 0.0, 3.5));
    }

    #[test]
    fn test_rotated_z_quarter_turn() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let r = p.rotated_z(Point3::ORIGIN, std::f64::consts::FRAC_PI_2);
        assert_eq!(r, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotated_z_about_pivot() {
        let p = Point3::new(2.0, 1.0, 5.0);
        let r = p.rotated_z(Point3::new(1.0, 1.0, 0.0), std::f64::consts::PI);
        assert_eq!(r, Point3::new(0.0, 1.0, 5.0));
    }

    #[test]
    fn test_rotated_x_quarter_turn() {
        let p = Point3::new(0.0, 1.0, 0.0);
        let r = p.rotated_x(Point3::ORIGIN, std::f64::consts::FRAC_PI_2);
        assert_eq!(r, Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotated_y_quarter_turn() {
        let p = Point3::new(0.0, 0.0, 1.0);
        let r = p.rotated_y(Point3::ORIGIN, std::f64::consts::FRAC_PI_2);
        assert_eq!(r, Point3::new(1.0, 0.0, 0.0));
    }
}
