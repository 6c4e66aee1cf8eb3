//! Isometric projection
//!
//! Maps world-space points into the fixed-angle isometric screen frame used
//! by both the occlusion engine and the raster canvas:
//!
//! ```text
//! isoX = x + z
//! isoY = y + z
//! h    = (isoX - isoY) * cos(30 deg)   screen-horizontal offset
//! v    = (isoX + isoY) / 2             screen-vertical offset
//! ```
//!
//! Two blocks that sit visually side by side share `h` ranges even when they
//! are diagonally separated in world space, which is why `h` replaces raw `y`
//! for overlap testing.

use crate::Point3;

/// cos(30 deg), the horizontal foreshortening of the isometric frame
pub const COS_30: f64 = 0.866_025_403_784_438_6;

/// A point projected into isometric screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsoPoint {
    /// Isometric x (`x + z`)
    pub x: f64,
    /// Isometric y (`y + z`)
    pub y: f64,
    /// Horizontal screen offset from the origin
    pub h: f64,
    /// Vertical screen offset from the origin
    pub v: f64,
}

/// Project a world-space point into isometric screen space
#[inline]
pub fn project(p: Point3) -> IsoPoint {
    let x = p.x + p.z;
    let y = p.y + p.z;
    IsoPoint {
        x,
        y,
        h: (x - y) * COS_30,
        v: (x + y) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_origin() {
        let iso = project(Point3::ORIGIN);
        assert_eq!(iso.x, 0.0);
        assert_eq!(iso.y, 0.0);
        assert_eq!(iso.h, 0.0);
        assert_eq!(iso.v, 0.0);
    }

    #[test]
    fn test_project_height_goes_straight_up() {
        // A purely vertical displacement has no horizontal screen component.
        let iso = project(Point3::new(0.0, 0.0, 2.0));
        assert_eq!(iso.x, 2.0);
        assert_eq!(iso.y, 2.0);
        assert_eq!(iso.h, 0.0);
        assert_eq!(iso.v, 2.0);
    }

    #[test]
    fn test_project_x_and_y_mirror() {
        let px = project(Point3::new(1.0, 0.0, 0.0));
        let py = project(Point3::new(0.0, 1.0, 0.0));
        assert_eq!(px.h, -py.h);
        assert_eq!(px.v, py.v);
        assert!(px.h > 0.0);
    }

    #[test]
    fn test_diagonal_neighbors_share_no_h_range_offset() {
        // (1,0,0) vs (0,1,0): visually left/right of each other, same height.
        let a = project(Point3::new(1.0, 0.0, 0.0));
        let b = project(Point3::new(0.0, 1.0, 0.0));
        assert_eq!(a.v, b.v);
        assert_eq!(a.h, COS_30);
        assert_eq!(b.h, -COS_30);
    }
}
