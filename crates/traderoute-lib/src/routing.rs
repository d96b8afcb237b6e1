use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::TravelConfig;
use crate::dijkstra::{DijkstraEngine, RescanEngine, ShortestPathEngine};
use crate::error::{Error, Result};
use crate::graph::{build_graph, RegionId, RouteGraph};
use crate::path::{path_cost, reconstruct};
use crate::records::TradeNetwork;

/// Relative tolerance when cross-checking the recomputed path cost against
/// the distance recorded by the engine.
const COST_TOLERANCE: f64 = 1e-9;

/// Supported shortest-path engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Heap-based Dijkstra with lazy deletion.
    #[default]
    Dijkstra,
    /// Quadratic rescan Dijkstra; small graphs only.
    Rescan,
}

impl RouteAlgorithm {
    fn engine(self) -> &'static dyn ShortestPathEngine {
        match self {
            RouteAlgorithm::Dijkstra => &DijkstraEngine,
            RouteAlgorithm::Rescan => &RescanEngine,
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::Rescan => "rescan",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "rescan" => Ok(RouteAlgorithm::Rescan),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: RegionId,
    pub goal: RegionId,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    /// Request using the default heap-based engine.
    pub fn new(start: RegionId, goal: RegionId) -> Self {
        Self {
            start,
            goal,
            algorithm: RouteAlgorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: RegionId,
    pub goal: RegionId,
    pub steps: Vec<RegionId>,
    /// Total travel time along `steps`.
    pub total_cost: f64,
}

impl RoutePlan {
    /// Number of trade routes travelled.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of a planning request. An unreachable goal is a normal outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(RoutePlan),
    Unreachable {
        algorithm: RouteAlgorithm,
        start: RegionId,
        goal: RegionId,
    },
}

impl RouteOutcome {
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOutcome::Found(plan) => Some(plan),
            RouteOutcome::Unreachable { .. } => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    /// Total travel time, infinite when the goal is unreachable.
    pub fn total_cost(&self) -> f64 {
        self.plan()
            .map(|plan| plan.total_cost)
            .unwrap_or(f64::INFINITY)
    }
}

/// Build the route graph from `network` and plan a route through it.
pub fn plan_route(
    network: &TradeNetwork,
    config: &TravelConfig,
    request: &RouteRequest,
) -> Result<RouteOutcome> {
    let mut graph = build_graph(network, config)?;
    plan_route_in_graph(&mut graph, request)
}

/// Plan a route through an already built graph.
///
/// Both endpoints are validated before the engine runs. The reported cost is
/// recomputed from the reconstructed path and cross-checked against the
/// distance the engine recorded for the goal.
pub fn plan_route_in_graph(graph: &mut RouteGraph, request: &RouteRequest) -> Result<RouteOutcome> {
    if !graph.contains(request.start) {
        return Err(Error::SourceNotInGraph { id: request.start });
    }
    if !graph.contains(request.goal) {
        return Err(Error::TargetNotInGraph { id: request.goal });
    }

    request.algorithm.engine().run(graph, request.start)?;

    let goal_distance = graph
        .region(request.goal)
        .map(|region| region.distance())
        .unwrap_or(f64::INFINITY);
    if goal_distance.is_infinite() {
        debug!(
            start = request.start,
            goal = request.goal,
            "goal unreachable from start"
        );
        return Ok(RouteOutcome::Unreachable {
            algorithm: request.algorithm,
            start: request.start,
            goal: request.goal,
        });
    }

    let steps = reconstruct(graph, request.goal)?;
    let total_cost = path_cost(graph, &steps)?;
    if (total_cost - goal_distance).abs() > COST_TOLERANCE * goal_distance.max(1.0) {
        warn!(
            recomputed = total_cost,
            recorded = goal_distance,
            "path cost disagrees with recorded distance"
        );
    }

    Ok(RouteOutcome::Found(RoutePlan {
        algorithm: request.algorithm,
        start: request.start,
        goal: request.goal,
        steps,
        total_cost,
    }))
}
