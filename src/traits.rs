//! Core traits for the pick-route planner.
//!
//! Heuristics are written against [`DistanceModel`] rather than a concrete
//! cost function, so alternative models can be swapped in for comparison.

use crate::layout::Point3;

/// Cost of moving between two points in the warehouse.
pub trait DistanceModel {
    /// Walking cost from `from` to `to`. Must be non-negative.
    fn distance(&self, from: &Point3, to: &Point3) -> f64;

    /// Pairwise cost matrix, indexed by the provided point order.
    fn matrix_for(&self, points: &[Point3]) -> Vec<Vec<f64>> {
        let n = points.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate() {
                if i != j {
                    matrix[i][j] = self.distance(from, to);
                }
            }
        }
        matrix
    }
}

/// Straight-line distance, ignoring racking. Useful as a lower bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl DistanceModel for StraightLine {
    fn distance(&self, from: &Point3, to: &Point3) -> f64 {
        from.distance(to)
    }
}
