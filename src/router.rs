//! Pick-route optimizer.
//!
//! Three heuristics order the same set of pick items: greedy nearest
//! neighbour, a serpentine sweep row by row, and level-first (nearest
//! neighbour inside each shelf level, lowest level first). All of them cost
//! routes with the same [`DistanceModel`], so their totals are comparable and
//! [`PickRouter::find_best_route`] can pick the cheapest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::{Layout, Point3};
use crate::pick::PickItem;
use crate::traits::DistanceModel;
use crate::walking::{WalkingDistance, DEFAULT_VERTICAL_PENALTY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// Weight of vertical movement relative to walking.
    pub vertical_penalty: f64,
    /// Walking speed in layout units per second.
    pub walking_speed: f64,
    /// Handling time per stop, in seconds.
    pub pick_time_per_item: f64,
    /// Evaluate the heuristics concurrently in [`PickRouter::find_best_route`].
    pub parallel: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            vertical_penalty: DEFAULT_VERTICAL_PENALTY,
            walking_speed: 1.2,
            pick_time_per_item: 20.0,
            parallel: true,
        }
    }
}

impl RouteOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("walking_speed", self.walking_speed)?;
        ConfigError::require_non_negative("vertical_penalty", self.vertical_penalty)?;
        ConfigError::require_non_negative("pick_time_per_item", self.pick_time_per_item)?;
        Ok(())
    }
}

/// Ordering heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingAlgorithm {
    NearestNeighbor,
    Serpentine,
    LevelFirst,
}

impl RoutingAlgorithm {
    pub const ALL: [RoutingAlgorithm; 3] = [
        RoutingAlgorithm::NearestNeighbor,
        RoutingAlgorithm::Serpentine,
        RoutingAlgorithm::LevelFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RoutingAlgorithm::NearestNeighbor => "nearest neighbor",
            RoutingAlgorithm::Serpentine => "serpentine",
            RoutingAlgorithm::LevelFirst => "level first",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub order: usize,
    pub item: PickItem,
    /// Where the picker stands for this item.
    pub stop: Point3,
    pub distance_from_previous: f64,
    pub cumulative_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRoute {
    pub algorithm: RoutingAlgorithm,
    pub steps: Vec<RouteStep>,
    pub total_distance: f64,
    pub estimated_time_seconds: f64,
    pub start_position: Point3,
    pub end_position: Point3,
}

impl PickRoute {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Item ids in visiting order.
    pub fn item_ids(&self) -> Vec<u64> {
        self.steps.iter().map(|step| step.item.id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmComparison {
    pub algorithm: RoutingAlgorithm,
    pub distance: f64,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRoute {
    pub best_route: PickRoute,
    pub algorithm: RoutingAlgorithm,
    /// One entry per heuristic, in [`RoutingAlgorithm::ALL`] order.
    pub comparison: Vec<AlgorithmComparison>,
}

/// Computes pick routes over a fixed layout and cost model.
#[derive(Debug, Clone)]
pub struct PickRouter<M = WalkingDistance> {
    layout: Layout,
    model: M,
    options: RouteOptions,
}

impl PickRouter<WalkingDistance> {
    pub fn new(layout: Layout, options: RouteOptions) -> Self {
        let model = WalkingDistance::new(layout.clone(), options.vertical_penalty);
        Self {
            layout,
            model,
            options,
        }
    }
}

impl Default for PickRouter<WalkingDistance> {
    fn default() -> Self {
        Self::new(Layout::default(), RouteOptions::default())
    }
}

impl<M: DistanceModel + Sync> PickRouter<M> {
    pub fn with_model(layout: Layout, model: M, options: RouteOptions) -> Self {
        Self {
            layout,
            model,
            options,
        }
    }

    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Where the picker stands for `item`: the pick stand at bin height when
    /// the bin code is known, the item position otherwise.
    pub fn stop_for(&self, item: &PickItem) -> Point3 {
        match &item.parsed {
            Some(parsed) => self.layout.pick_stand_position(&item.position, parsed.row(), true),
            None => item.position,
        }
    }

    pub fn distance(&self, from: &Point3, to: &Point3) -> f64 {
        self.model.distance(from, to)
    }

    /// Travel plus handling time for a route of `stops` stops.
    pub fn estimate_seconds(&self, distance: f64, stops: usize) -> f64 {
        distance / self.options.walking_speed + stops as f64 * self.options.pick_time_per_item
    }

    /// Orders `items` with one heuristic.
    pub fn calculate_pick_route(
        &self,
        items: &[PickItem],
        start: Point3,
        algorithm: RoutingAlgorithm,
    ) -> PickRoute {
        let stops: Vec<Point3> = items.iter().map(|item| self.stop_for(item)).collect();

        // Point 0 is the start; item i is point i + 1.
        let mut points = Vec::with_capacity(stops.len() + 1);
        points.push(start);
        points.extend_from_slice(&stops);
        let matrix = self.model.matrix_for(&points);

        let order = match algorithm {
            RoutingAlgorithm::NearestNeighbor => {
                let all: Vec<usize> = (0..items.len()).collect();
                nearest_neighbor(&matrix, 0, &all)
            }
            RoutingAlgorithm::Serpentine => serpentine(items, self.layout.row_pitch()),
            RoutingAlgorithm::LevelFirst => level_first(items, &matrix),
        };

        let route = self.assemble(items, &stops, &matrix, start, algorithm, &order);
        tracing::debug!(
            algorithm = algorithm.name(),
            stops = route.len(),
            distance = route.total_distance,
            "calculated pick route"
        );
        route
    }

    /// Runs every heuristic and keeps the shortest route. Ties go to the
    /// heuristic listed first in [`RoutingAlgorithm::ALL`].
    pub fn find_best_route(&self, items: &[PickItem], start: Point3) -> BestRoute {
        let route = |algorithm| self.calculate_pick_route(items, start, algorithm);

        let routes: [PickRoute; 3] = if self.options.parallel {
            let (nearest, (serpentine, level_first)) = rayon::join(
                || route(RoutingAlgorithm::NearestNeighbor),
                || {
                    rayon::join(
                        || route(RoutingAlgorithm::Serpentine),
                        || route(RoutingAlgorithm::LevelFirst),
                    )
                },
            );
            [nearest, serpentine, level_first]
        } else {
            RoutingAlgorithm::ALL.map(route)
        };

        let comparison = routes
            .iter()
            .map(|route| AlgorithmComparison {
                algorithm: route.algorithm,
                distance: route.total_distance,
                time: route.estimated_time_seconds,
            })
            .collect();

        let [first, second, third] = routes;
        let best_route = [second, third].into_iter().fold(first, |best, candidate| {
            if candidate.total_distance < best.total_distance {
                candidate
            } else {
                best
            }
        });

        tracing::debug!(
            algorithm = best_route.algorithm.name(),
            distance = best_route.total_distance,
            "selected best pick route"
        );

        BestRoute {
            algorithm: best_route.algorithm,
            best_route,
            comparison,
        }
    }

    fn assemble(
        &self,
        items: &[PickItem],
        stops: &[Point3],
        matrix: &[Vec<f64>],
        start: Point3,
        algorithm: RoutingAlgorithm,
        order: &[usize],
    ) -> PickRoute {
        let mut steps = Vec::with_capacity(order.len());
        let mut previous = 0;
        let mut cumulative = 0.0;

        for (position, &index) in order.iter().enumerate() {
            let leg = matrix[previous][index + 1];
            cumulative += leg;
            steps.push(RouteStep {
                order: position,
                item: items[index].clone(),
                stop: stops[index],
                distance_from_previous: leg,
                cumulative_distance: cumulative,
            });
            previous = index + 1;
        }

        let end_position = steps.last().map(|step| step.stop).unwrap_or(start);
        PickRoute {
            algorithm,
            estimated_time_seconds: self.estimate_seconds(cumulative, steps.len()),
            total_distance: cumulative,
            start_position: start,
            end_position,
            steps,
        }
    }
}

/// Orders items with the default layout and options.
pub fn calculate_pick_route(
    items: &[PickItem],
    start: Point3,
    algorithm: RoutingAlgorithm,
) -> PickRoute {
    PickRouter::default().calculate_pick_route(items, start, algorithm)
}

/// Finds the best route with the default layout and options.
pub fn find_best_route(items: &[PickItem], start: Point3) -> BestRoute {
    PickRouter::default().find_best_route(items, start)
}

/// Greedy nearest neighbour over `candidates` (item indices), starting at
/// matrix point `from`. Ties keep the earlier candidate.
fn nearest_neighbor(matrix: &[Vec<f64>], from: usize, candidates: &[usize]) -> Vec<usize> {
    let mut remaining = candidates.to_vec();
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = from;

    while !remaining.is_empty() {
        let mut best = 0;
        for (slot, &item) in remaining.iter().enumerate().skip(1) {
            if matrix[current][item + 1] < matrix[current][remaining[best] + 1] {
                best = slot;
            }
        }
        let next = remaining.remove(best);
        order.push(next);
        current = next + 1;
    }
    order
}

/// S-shaped sweep: rows in increasing Z, alternating direction along X.
fn serpentine(items: &[PickItem], row_pitch: f64) -> Vec<usize> {
    let mut rows: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (index, item) in items.iter().enumerate() {
        let key = (item.position.z / row_pitch).round() as i64;
        rows.entry(key).or_default().push(index);
    }

    let mut order = Vec::with_capacity(items.len());
    for (row_number, (_, mut row)) in rows.into_iter().enumerate() {
        let descending = row_number % 2 == 1;
        row.sort_by(|&a, &b| {
            let (a, b) = (&items[a], &items[b]);
            let along = a.position.x.total_cmp(&b.position.x);
            let along = if descending { along.reverse() } else { along };
            along.then(a.level_index.cmp(&b.level_index))
        });
        order.extend(row);
    }
    order
}

/// Lowest level first; nearest neighbour within each level, continuing from
/// wherever the previous level ended.
fn level_first(items: &[PickItem], matrix: &[Vec<f64>]) -> Vec<usize> {
    let mut levels: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, item) in items.iter().enumerate() {
        levels.entry(item.level_index).or_default().push(index);
    }

    let mut order = Vec::with_capacity(items.len());
    let mut current = 0;
    for members in levels.into_values() {
        let visit = nearest_neighbor(matrix, current, &members);
        if let Some(&last) = visit.last() {
            current = last + 1;
        }
        order.extend(visit);
    }
    order
}
