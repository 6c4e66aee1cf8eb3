//! Screen-space bounding boxes
//!
//! The unit of occlusion comparison is not a block's raw 3D extent but the
//! interval its projected vertices cover on three axes: isometric x,
//! isometric y, and the screen-horizontal offset `h`. The world-space
//! vertical extent is kept alongside them for the depth score. All bounds
//! are rounded to 3 decimal places so floating-point noise cannot create
//! spurious non-overlap.

use isoroute_math::{iso, quantize, Solid};

/// Weight of the vertical extent in the depth score. Vertical placement
/// dominates apparent layering in this isometric convention.
const DEPTH_Z_WEIGHT: f64 = 4.0;

/// Projected bounding intervals of a solid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Isometric x interval (`x + z` over all vertices)
    pub xmin: f64,
    pub xmax: f64,
    /// Isometric y interval (`y + z` over all vertices)
    pub ymin: f64,
    pub ymax: f64,
    /// World-space vertical interval
    pub zmin: f64,
    pub zmax: f64,
    /// Screen-horizontal interval
    pub hmin: f64,
    pub hmax: f64,
}

impl BoundingBox {
    /// Compute the bounding box of a solid's projected vertices
    pub fn of_solid(solid: &Solid) -> Self {
        let mut bbox = Self::empty();
        for p in solid.vertices() {
            let iso = iso::project(p);
            bbox.xmin = bbox.xmin.min(iso.x);
            bbox.xmax = bbox.xmax.max(iso.x);
            bbox.ymin = bbox.ymin.min(iso.y);
            bbox.ymax = bbox.ymax.max(iso.y);
            bbox.zmin = bbox.zmin.min(p.z);
            bbox.zmax = bbox.zmax.max(p.z);
            bbox.hmin = bbox.hmin.min(iso.h);
            bbox.hmax = bbox.hmax.max(iso.h);
        }
        bbox.rounded()
    }

    fn empty() -> Self {
        Self {
            xmin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,
            ymax: f64::NEG_INFINITY,
            zmin: f64::INFINITY,
            zmax: f64::NEG_INFINITY,
            hmin: f64::INFINITY,
            hmax: f64::NEG_INFINITY,
        }
    }

    fn rounded(self) -> Self {
        Self {
            xmin: quantize(self.xmin),
            xmax: quantize(self.xmax),
            ymin: quantize(self.ymin),
            ymax: quantize(self.ymax),
            zmin: quantize(self.zmin),
            zmax: quantize(self.zmax),
            hmin: quantize(self.hmin),
            hmax: quantize(self.hmax),
        }
    }

    /// Merge another box into this one (union of intervals)
    pub fn merged(self, other: BoundingBox) -> Self {
        Self {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
            zmin: self.zmin.min(other.zmin),
            zmax: self.zmax.max(other.zmax),
            hmin: self.hmin.min(other.hmin),
            hmax: self.hmax.max(other.hmax),
        }
    }

    /// Closed-interval intersection test on the x, y, and h axes
    ///
    /// Touching endpoints count as overlapping. Boxes that do not overlap
    /// impose no ordering constraint between their blocks.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.xmin <= other.xmax
            && other.xmin <= self.xmax
            && self.ymin <= other.ymax
            && other.ymin <= self.ymax
            && self.hmin <= other.hmax
            && other.hmin <= self.hmax
    }

    /// Depth score: lower means visually in front
    #[inline]
    pub fn depth(&self) -> f64 {
        self.xmax + self.ymax - DEPTH_Z_WEIGHT * self.zmax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoroute_math::{Point3, Solid};

    fn unit_box(x: f64, y: f64, z: f64) -> BoundingBox {
        BoundingBox::of_solid(&Solid::prism(Point3::new(x, y, z), 1.0, 1.0, 1.0))
    }

    #[test]
    fn test_unit_block_bounds() {
        let bbox = unit_box(0.0, 0.0, 0.0);
        assert_eq!((bbox.xmin, bbox.xmax), (0.0, 2.0));
        assert_eq!((bbox.ymin, bbox.ymax), (0.0, 2.0));
        assert_eq!((bbox.zmin, bbox.zmax), (0.0, 1.0));
        assert_eq!((bbox.hmin, bbox.hmax), (-0.866, 0.866));
    }

    #[test]
    fn test_depth_scores() {
        // Stacked unit blocks: the upper one scores lower (more in front).
        assert_eq!(unit_box(0.0, 0.0, 0.0).depth(), 0.0);
        assert_eq!(unit_box(0.0, 0.0, 1.0).depth(), -2.0);
    }

    #[test]
    fn test_stacked_blocks_overlap() {
        let lower = unit_box(0.0, 0.0, 0.0);
        let upper = unit_box(0.0, 0.0, 1.0);
        assert!(lower.overlaps(&upper));
    }

    #[test]
    fn test_touching_endpoints_overlap() {
        let a = unit_box(0.0, 0.0, 0.0);
        let b = unit_box(2.0, 0.0, 0.0);
        // iso-x intervals are [0,2] and [2,4]: touching counts.
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_distant_blocks_do_not_overlap() {
        let a = unit_box(0.0, 0.0, 0.0);
        let b = unit_box(5.0, 5.0, 0.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_diagonal_separation_is_no_overlap() {
        // (2,0,0) and (0,2,0) share iso x/y ranges once height is added in,
        // but sit left and right of each other on screen: h decides.
        let a = unit_box(2.0, 0.0, 0.0);
        let b = unit_box(0.0, 2.0, 0.0);
        assert!(a.hmin > b.hmax);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_merged_unions_intervals() {
        let merged = unit_box(0.0, 0.0, 0.0).merged(unit_box(0.0, 0.0, 1.0));
        assert_eq!((merged.zmin, merged.zmax), (0.0, 2.0));
        assert_eq!((merged.xmin, merged.xmax), (0.0, 3.0));
    }
}
