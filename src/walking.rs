//! Walking-distance model for pickers moving between racks.
//!
//! Pickers cannot cut through racking. Moving within one aisle costs the
//! distance along the aisle; moving to another aisle means walking to the
//! current aisle's midline, along it, across to the target aisle's midline
//! and then to the target. Height changes are weighted by a penalty.

use crate::layout::{Layout, Point3};
use crate::traits::DistanceModel;

/// Default weight of vertical movement relative to walking.
pub const DEFAULT_VERTICAL_PENALTY: f64 = 1.5;

/// Slack added to the back-to-back gap when deciding whether two points
/// share an aisle.
const SAME_AISLE_EPSILON: f64 = 1e-6;

/// Aisle-aware walking distance.
#[derive(Debug, Clone)]
pub struct WalkingDistance {
    layout: Layout,
    /// Multiplier applied to |Δy|.
    pub vertical_penalty: f64,
}

impl Default for WalkingDistance {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            vertical_penalty: DEFAULT_VERTICAL_PENALTY,
        }
    }
}

impl WalkingDistance {
    pub fn new(layout: Layout, vertical_penalty: f64) -> Self {
        Self {
            layout,
            vertical_penalty,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether two points are close enough in Z to walk between directly.
    pub fn same_aisle(&self, a: &Point3, b: &Point3) -> bool {
        same_aisle(&self.layout, a, b)
    }
}

pub(crate) fn same_aisle(layout: &Layout, a: &Point3, b: &Point3) -> bool {
    (a.z - b.z).abs() <= layout.back_to_back_gap + SAME_AISLE_EPSILON
}

impl DistanceModel for WalkingDistance {
    fn distance(&self, from: &Point3, to: &Point3) -> f64 {
        let vertical = (from.y - to.y).abs() * self.vertical_penalty;
        let along = (from.x - to.x).abs();

        if self.same_aisle(from, to) {
            return along + vertical;
        }

        let from_aisle = self.layout.aisle_center_z(from.z);
        let to_aisle = self.layout.aisle_center_z(to.z);
        (from.z - from_aisle).abs()
            + along
            + (from_aisle - to_aisle).abs()
            + (to_aisle - to.z).abs()
            + vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::ParsedLocationCode;

    fn stand(code: &str) -> Point3 {
        let layout = Layout::default();
        let parsed = ParsedLocationCode::parse(code).unwrap();
        layout.pick_stand_position(&layout.position_of(&parsed), parsed.row(), true)
    }

    #[test]
    fn test_same_point_is_zero() {
        let model = WalkingDistance::default();
        let p = stand("AC03AB01");
        assert_eq!(model.distance(&p, &p), 0.0);
    }

    #[test]
    fn test_same_aisle_is_along_plus_vertical() {
        let model = WalkingDistance::default();
        let a = stand("AC01AA01");
        let b = stand("AC05AC01");
        let expected = 4.0 * 2.7 + 2.0 * 1.5 * DEFAULT_VERTICAL_PENALTY;
        assert!((model.distance(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_facing_rows_share_an_aisle() {
        let model = WalkingDistance::default();
        // AB faces up, AC faces down: both are picked from aisle 1.
        let a = stand("AB02AA01");
        let b = stand("AC02AA01");
        assert!(model.same_aisle(&a, &b));
        assert!(model.distance(&a, &b) < 1e-9);
    }

    #[test]
    fn test_cross_aisle_detours_via_midlines() {
        let layout = Layout::default();
        let model = WalkingDistance::default();
        let a = stand("AC01AA01");
        let b = stand("AE04AA01");
        assert!(!model.same_aisle(&a, &b));
        let expected = 3.0 * 2.7 + layout.row_pitch();
        assert!((model.distance(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_raw_positions_walk_into_the_aisle() {
        let layout = Layout::default();
        let model = WalkingDistance::default();
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, layout.row_pitch());
        let half = layout.aisle_clearance() / 2.0;
        // Each point sits half an aisle off the midline it walks to.
        let expected = half + layout.row_pitch() + half;
        assert!((model.distance(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let model = WalkingDistance::default();
        let a = stand("AA07AD02");
        let b = stand("AF02AB01");
        assert!((model.distance(&a, &b) - model.distance(&b, &a)).abs() < 1e-9);
    }
}
