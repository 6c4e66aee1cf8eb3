//! Positioned block primitive
//!
//! A [`Block`] is a single positioned solid with an identity derived from its
//! origin and extents. Rotating a block replaces its geometry but keeps the
//! identity fields, so graph bookkeeping stays stable across scene rotation.

use isoroute_math::{Color, Point3, Solid};

/// Tiling direction of a composite structure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    X,
    Y,
    Up,
    Down,
}

impl Direction {
    /// Unit step along this direction, as world-space deltas
    pub fn step(self) -> (f64, f64, f64) {
        match self {
            Direction::X => (1.0, 0.0, 0.0),
            Direction::Y => (0.0, 1.0, 0.0),
            Direction::Up => (0.0, 0.0, 1.0),
            Direction::Down => (0.0, 0.0, -1.0),
        }
    }
}

/// Stable identity of a block: origin plus extents
///
/// Two blocks with identical origin and extents are the same graph node even
/// if constructed independently, and the identity survives rotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(String);

impl BlockId {
    pub(crate) fn from_parts(origin: Point3, dx: f64, dy: f64, dz: f64) -> Self {
        Self(format!(
            "{},{},{}--{}x{}x{}",
            origin.x, origin.y, origin.z, dx, dy, dz
        ))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single positioned solid with identity and color
#[derive(Clone, Debug)]
pub struct Block {
    pub origin: Point3,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub color: Option<Color>,
    solid: Solid,
}

impl Block {
    /// Create a block with the given extents, built as a rectangular prism
    pub fn new(origin: Point3, dx: f64, dy: f64, dz: f64) -> Self {
        let origin = Point3::new(origin.x, origin.y, origin.z);
        Self {
            origin,
            dx,
            dy,
            dz,
            color: None,
            solid: Solid::prism(origin, dx, dy, dz),
        }
    }

    /// Create a unit block at the given origin
    pub fn unit(origin: Point3) -> Self {
        Self::new(origin, 1.0, 1.0, 1.0)
    }

    /// Replace the block's color
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Replace the block's geometry while keeping origin, extents, and color
    pub fn with_solid(mut self, solid: Solid) -> Self {
        self.solid = solid;
        self
    }

    /// The block's geometry
    #[inline]
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// The stable identity of this block
    pub fn id(&self) -> BlockId {
        BlockId::from_parts(self.origin, self.dx, self.dy, self.dz)
    }

    /// Return this block rotated about the X axis; identity fields are kept
    pub fn rotated_x(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            solid: self.solid.rotated_x(pivot, angle),
            ..self.clone()
        }
    }

    /// Return this block rotated about the Y axis; identity fields are kept
    pub fn rotated_y(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            solid: self.solid.rotated_y(pivot, angle),
            ..self.clone()
        }
    }

    /// Return this block rotated about the Z axis; identity fields are kept
    pub fn rotated_z(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            solid: self.solid.rotated_z(pivot, angle),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let block = Block::unit(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(block.id().as_str(), "1,2,3--1x1x1");
    }

    #[test]
    fn test_id_fractional_origin() {
        let block = Block::new(Point3::new(0.2, 0.0, 0.4), 0.2, 1.0, 0.2);
        assert_eq!(block.id().as_str(), "0.2,0,0.4--0.2x1x0.2");
    }

    #[test]
    fn test_identical_blocks_share_id() {
        let a = Block::unit(Point3::new(1.0, 1.0, 0.0));
        let b = Block::unit(Point3::new(1.0, 1.0, 0.0));
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_id_stable_across_rotation() {
        let block = Block::unit(Point3::new(2.0, 0.0, 0.0));
        let rotated = block.rotated_z(Point3::new(8.0, 8.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert_eq!(block.id(), rotated.id());
        assert_ne!(block.solid(), rotated.solid());
    }

    #[test]
    fn test_unit_block_geometry() {
        let block = Block::unit(Point3::ORIGIN);
        assert_eq!(block.solid().faces().len(), 6);
    }
}
