//! Polygon path type

use serde::{Deserialize, Serialize};

use crate::Point3;

/// An ordered polygon path in 3D space
///
/// Paths are the faces of a [`Solid`](crate::Solid). Winding order determines
/// the face orientation; [`reversed`](Path::reversed) flips it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Point3>,
}

impl Path {
    /// Create a path from a list of points
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Number of points in the path
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return this path with the winding order flipped
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Return this path displaced by the given deltas
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| p.translated(dx, dy, dz))
                .collect(),
        }
    }

    /// Rotate every point about the X axis around `pivot`
    pub fn rotated_x(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.rotated_x(pivot, angle)).collect(),
        }
    }

    /// Rotate every point about the Y axis around `pivot`
    pub fn rotated_y(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.rotated_y(pivot, angle)).collect(),
        }
    }

    /// Rotate every point about the Z axis around `pivot`
    pub fn rotated_z(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.rotated_z(pivot, angle)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed() {
        let path = Path::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);
        let rev = path.reversed();
        assert_eq!(rev.points[0], Point3::new(1.0, 1.0, 0.0));
        assert_eq!(rev.points[2], Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_translated() {
        let path = Path::new(vec![Point3::ORIGIN]).translated(1.0, 2.0, 3.0);
        assert_eq!(path.points[0], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotated_z() {
        let path = Path::new(vec![Point3::new(1.0, 0.0, 0.0)]);
        let rot = path.rotated_z(Point3::ORIGIN, std::f64::consts::PI);
        assert_eq!(rot.points[0], Point3::new(-1.0, 0.0, 0.0));
    }
}
