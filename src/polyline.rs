//! Polyline representation for route geometries.
//!
//! Routes are costed with the aisle model in [`crate::walking`]; this module
//! turns a route into the path a renderer draws, inserting the aisle
//! midline via-points the model assumes for cross-aisle legs.

use serde::{Deserialize, Serialize};

use crate::layout::{Layout, Point3};
use crate::router::PickRoute;
use crate::walking::same_aisle;

/// A polyline through layout space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point3>,
}

impl Polyline {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    /// Sum of straight segment lengths.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    fn push(&mut self, point: Point3) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }
}

/// Path a picker walks for `route`: start, aisle via-points, then each stop.
pub fn route_polyline(route: &PickRoute, layout: &Layout) -> Polyline {
    let mut line = Polyline::new(Vec::with_capacity(route.len() * 3 + 1));
    line.push(route.start_position);

    let mut current = route.start_position;
    for step in &route.steps {
        let next = step.stop;
        if !same_aisle(layout, &current, &next) {
            let from_aisle = layout.aisle_center_z(current.z);
            let to_aisle = layout.aisle_center_z(next.z);
            line.push(Point3::new(current.x, current.y, from_aisle));
            line.push(Point3::new(next.x, current.y, from_aisle));
            line.push(Point3::new(next.x, current.y, to_aisle));
        }
        line.push(next);
        current = next;
    }
    line
}
