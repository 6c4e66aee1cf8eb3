//! Rotation-equivalence lookup
//!
//! After the scene is rotated by a multiple of 90 degrees, the world axes
//! are relabeled on screen: a point that used to anchor the end of a track
//! now coincides with a different world point. Each quadrant has its own
//! sign pattern for comparing rounded coordinate differences. Callers use
//! the lookup to snap new structures onto existing geometry regardless of
//! the current rotation; a miss is a normal "no match" result.

use isoroute_math::Point3;

use crate::block::Direction;
use crate::group::BlockGroup;

const TAU: f64 = std::f64::consts::TAU;

/// 90-degree bucket of the scene's current rotation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Quadrant {
    #[default]
    Q0,
    Q1,
    Q2,
    Q3,
}

impl Quadrant {
    /// Snap a rotation angle (radians) to its quadrant
    pub fn from_rotation(rotation: f64) -> Self {
        let frac = ((TAU - rotation).abs() / TAU) % 1.0;
        let snapped = ((frac / 0.25).round() * 0.25) % 1.0;
        if (snapped - 0.25).abs() < 1e-9 {
            Quadrant::Q1
        } else if (snapped - 0.5).abs() < 1e-9 {
            Quadrant::Q2
        } else if (snapped - 0.75).abs() < 1e-9 {
            Quadrant::Q3
        } else {
            Quadrant::Q0
        }
    }

    /// The quadrant as a fraction of a full turn
    pub fn value(self) -> f64 {
        match self {
            Quadrant::Q0 => 0.0,
            Quadrant::Q1 => 0.25,
            Quadrant::Q2 => 0.5,
            Quadrant::Q3 => 0.75,
        }
    }
}

/// Whether two points coincide in rotated screen space
///
/// Differences are taken on rounded integer coordinates; the quadrant
/// selects the sign pattern induced by the axis relabeling.
pub fn is_equivalent(p1: Point3, p2: Point3, quadrant: Quadrant) -> bool {
    let xd = p1.x.round() as i64 - p2.x.round() as i64;
    let yd = p1.y.round() as i64 - p2.y.round() as i64;
    let zd = p1.z.round() as i64 - p2.z.round() as i64;
    match quadrant {
        Quadrant::Q0 => xd == -zd && yd == -zd,
        Quadrant::Q1 => xd == zd && yd == -zd,
        Quadrant::Q2 => xd == zd && yd == zd,
        Quadrant::Q3 => xd == -zd && yd == zd,
    }
}

/// Anchor points a group offers for snapping: the top surface along the
/// tiling axis for X/Y groups, the single top point for vertical groups
pub(crate) fn anchor_points(group: &BlockGroup) -> Vec<Point3> {
    let o = group.origin;
    match group.direction {
        Direction::X => (0..group.dx.round() as i64)
            .map(|i| Point3::new(o.x + i as f64, o.y, o.z + group.dz))
            .collect(),
        Direction::Y => (0..group.dy.round() as i64)
            .map(|i| Point3::new(o.x, o.y + i as f64, o.z + group.dz))
            .collect(),
        Direction::Up | Direction::Down => {
            vec![Point3::new(o.x, o.y, o.z + group.dz)]
        }
    }
}

/// Find the anchor point equivalent to `query` among `groups`
///
/// When several candidates match, the highest (greatest world z) wins.
/// Returns `None` when nothing matches.
pub fn equivalent_point(groups: &[BlockGroup], query: Point3, quadrant: Quadrant) -> Option<Point3> {
    let mut best: Option<Point3> = None;
    for group in groups {
        for candidate in anchor_points(group) {
            if !is_equivalent(query, candidate, quadrant) {
                continue;
            }
            match best {
                Some(b) if b.z >= candidate.z => {}
                _ => best = Some(candidate),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAC_PI_2: f64 = std::f64::consts::FRAC_PI_2;
    const PI: f64 = std::f64::consts::PI;

    #[test]
    fn test_quadrant_snapping() {
        assert_eq!(Quadrant::from_rotation(0.0), Quadrant::Q0);
        assert_eq!(Quadrant::from_rotation(FRAC_PI_2), Quadrant::Q3);
        assert_eq!(Quadrant::from_rotation(PI), Quadrant::Q2);
        assert_eq!(Quadrant::from_rotation(3.0 * FRAC_PI_2), Quadrant::Q1);
        assert_eq!(Quadrant::from_rotation(TAU), Quadrant::Q0);
        assert_eq!(Quadrant::from_rotation(-FRAC_PI_2), Quadrant::Q1);
    }

    #[test]
    fn test_quadrant_snaps_nearby_angles() {
        assert_eq!(Quadrant::from_rotation(0.1), Quadrant::Q0);
        assert_eq!(Quadrant::from_rotation(FRAC_PI_2 + 0.1), Quadrant::Q3);
    }

    #[test]
    fn test_equivalence_unrotated() {
        // Q0: dropping one unit while stepping (+1,+1) lands on the same
        // screen position.
        let anchor = Point3::new(2.0, 3.0, 1.0);
        let query = Point3::new(3.0, 4.0, 0.0);
        assert!(is_equivalent(query, anchor, Quadrant::Q0));
        assert!(!is_equivalent(query, anchor, Quadrant::Q2));
    }

    #[test]
    fn test_equivalence_same_point_any_quadrant() {
        let p = Point3::new(4.0, 4.0, 2.0);
        for q in [Quadrant::Q0, Quadrant::Q1, Quadrant::Q2, Quadrant::Q3] {
            assert!(is_equivalent(p, p, q));
        }
    }

    #[test]
    fn test_lookup_prefers_highest_match() {
        // Anchors (0,0,1) and (1,1,0) occupy the same screen position;
        // the higher one wins.
        let column = BlockGroup::column(Point3::ORIGIN, 1, Direction::Up).unwrap();
        let track = BlockGroup::track(Point3::new(1.0, 1.0, -1.0), 1, Direction::X).unwrap();
        let groups = vec![column, track];
        let hit = equivalent_point(&groups, Point3::new(0.0, 0.0, 1.0), Quadrant::Q0);
        assert_eq!(hit, Some(Point3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let track = BlockGroup::track(Point3::ORIGIN, 2, Direction::X).unwrap();
        let miss = equivalent_point(&[track], Point3::new(9.0, 9.0, 9.0), Quadrant::Q0);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_column_offers_single_anchor() {
        let column = BlockGroup::column(Point3::new(1.0, 1.0, 0.0), 3, Direction::Up).unwrap();
        let anchors = anchor_points(&column);
        assert_eq!(anchors, vec![Point3::new(1.0, 1.0, 3.0)]);
    }
}
