//! Oriented solid geometry
//!
//! A solid is a set of planar polygon faces. The two constructors cover
//! everything the block engine needs: axis-aligned prisms for unit blocks
//! and extrusions of arbitrary 2D paths for the non-rectangular end caps.
//! Faces are wound so their normals point out of the solid, which the
//! renderer relies on for shading.

use crate::{Path, Point3};

/// An oriented solid built from planar polygon faces
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solid {
    faces: Vec<Path>,
}

impl Solid {
    /// Create a solid from pre-built faces
    pub fn new(faces: Vec<Path>) -> Self {
        Self { faces }
    }

    /// Create a degenerate solid from a single path
    ///
    /// Used for pen strokes (grid lines) that are painted but enclose no
    /// volume.
    pub fn from_path(path: Path) -> Self {
        Self { faces: vec![path] }
    }

    /// Build an axis-aligned rectangular prism
    ///
    /// `origin` is the corner with the smallest coordinates; `dx`, `dy`, `dz`
    /// are the extents along each axis.
    pub fn prism(origin: Point3, dx: f64, dy: f64, dz: f64) -> Self {
        let o = origin;
        let mut faces = Vec::with_capacity(6);

        // Side parallel to the x-axis, then its far twin
        let face1 = Path::new(vec![
            o,
            o.translated(dx, 0.0, 0.0),
            o.translated(dx, 0.0, dz),
            o.translated(0.0, 0.0, dz),
        ]);
        faces.push(face1.reversed());
        faces.push(face1.translated(0.0, dy, 0.0));

        // Side parallel to the y-axis, then its far twin
        let face2 = Path::new(vec![
            o,
            o.translated(0.0, 0.0, dz),
            o.translated(0.0, dy, dz),
            o.translated(0.0, dy, 0.0),
        ]);
        faces.push(face2.reversed());
        faces.push(face2.translated(dx, 0.0, 0.0));

        // Bottom, then top; wound so the top's normal points up
        let face3 = Path::new(vec![
            o,
            o.translated(dx, 0.0, 0.0),
            o.translated(dx, dy, 0.0),
            o.translated(0.0, dy, 0.0),
        ]);
        faces.push(face3.reversed());
        faces.push(face3.translated(0.0, 0.0, dz));

        Self { faces }
    }

    /// Build a solid by sweeping a planar path `depth` units along +z
    pub fn extrude(path: &Path, depth: f64) -> Self {
        let top = path.translated(0.0, 0.0, depth);
        let n = path.len();
        let mut faces = Vec::with_capacity(n + 2);

        faces.push(path.reversed());
        faces.push(top.clone());

        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(Path::new(vec![
                top.points[i],
                path.points[i],
                path.points[j],
                top.points[j],
            ]));
        }

        Self { faces }
    }

    /// The faces of this solid
    #[inline]
    pub fn faces(&self) -> &[Path] {
        &self.faces
    }

    /// Iterate over every vertex of every face
    pub fn vertices(&self) -> impl Iterator<Item = Point3> + '_ {
        self.faces.iter().flat_map(|f| f.points.iter().copied())
    }

    /// Return this solid rotated about the X axis around `pivot`
    pub fn rotated_x(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            faces: self.faces.iter().map(|f| f.rotated_x(pivot, angle)).collect(),
        }
    }

    /// Return this solid rotated about the Y axis around `pivot`
    pub fn rotated_y(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            faces: self.faces.iter().map(|f| f.rotated_y(pivot, angle)).collect(),
        }
    }

    /// Return this solid rotated about the Z axis around `pivot`
    pub fn rotated_z(&self, pivot: Point3, angle: f64) -> Self {
        Self {
            faces: self.faces.iter().map(|f| f.rotated_z(pivot, angle)).collect(),
        }
    }

    /// Return this solid displaced by the given deltas
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            faces: self.faces.iter().map(|f| f.translated(dx, dy, dz)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prism_face_count() {
        let prism = Solid::prism(Point3::ORIGIN, 1.0, 1.0, 1.0);
        assert_eq!(prism.faces().len(), 6);
        for face in prism.faces() {
            assert_eq!(face.len(), 4);
        }
    }

    #[test]
    fn test_prism_vertex_bounds() {
        let prism = Solid::prism(Point3::new(1.0, 2.0, 3.0), 2.0, 1.0, 4.0);
        let xs: Vec<f64> = prism.vertices().map(|p| p.x).collect();
        let zs: Vec<f64> = prism.vertices().map(|p| p.z).collect();
        assert_eq!(xs.iter().cloned().fold(f64::INFINITY, f64::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 3.0);
        assert_eq!(zs.iter().cloned().fold(f64::INFINITY, f64::min), 3.0);
        assert_eq!(zs.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 7.0);
    }

    #[test]
    fn test_extrude_triangle() {
        let tri = Path::new(vec![
            Point3::ORIGIN,
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);
        let solid = Solid::extrude(&tri, 1.0);
        // bottom + top + 3 sides
        assert_eq!(solid.faces().len(), 5);
        let zmax = solid
            .vertices()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(zmax, 1.0);
    }

    #[test]
    fn test_rotated_z_moves_all_faces() {
        let prism = Solid::prism(Point3::ORIGIN, 1.0, 1.0, 1.0);
        let rot = prism.rotated_z(Point3::ORIGIN, std::f64::consts::PI);
        let xmin = rot.vertices().map(|p| p.x).fold(f64::INFINITY, f64::min);
        assert_eq!(xmin, -1.0);
    }
}
