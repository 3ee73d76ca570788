//! Least-cost routes between two cities and the metrics derived from them.

use crate::collections::CoastalSet;
use crate::errors::PathPlannerError;
use crate::graph::CityGraph;
use crate::graph_algos::dijkstra::dijkstra;

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::debug;


/// Hours per unit of route cost used for the time estimate
pub const DEFAULT_TIME_ESTIMATE_FACTOR: f64 = 2.0;


/// Outcome of a shortest-path search
#[derive(Clone, Debug, PartialEq)]
pub enum PathResult {
    /// Ordered cities from origin to destination (inclusive) and the summed cost
    Found { path: Vec<String>, cost: f64 },
    Unreachable,
}

impl PathResult {
    pub fn cost(&self) -> Option<f64> {
        match self {
            PathResult::Found { cost, .. } => Some(*cost),
            PathResult::Unreachable => None,
        }
    }
}


/// Least-cost path between two cities
///
/// A city missing from the graph gives `Unreachable`, the same as a city in a
/// different component. When origin and destination are the same city present
/// in the graph, the result is that single city at cost 0.
pub fn shortest_path(graph: &CityGraph, origin: &str, destination: &str) -> PathResult {
    let (Some(start), Some(goal)) = (graph.index_of(origin), graph.index_of(destination)) else {
        debug!(origin, destination, "endpoint not in graph");
        return PathResult::Unreachable;
    };

    let neighbors = |&node: &usize| {
        graph.adjacent(node)
            .map(|(neighbor, cost)| (neighbor, OrderedFloat(cost)))
            .collect::<Vec<_>>()
    };

    match dijkstra(start, neighbors, |&node| node == goal) {
        Ok((indices, OrderedFloat(cost))) => {
            let path = indices.into_iter()
                .filter_map(|index| graph.name_of(index).map(str::to_string))
                .collect();
            PathResult::Found { path, cost }
        }
        Err(PathPlannerError::NoPathFound) => PathResult::Unreachable,
    }
}


/// Route between two cities annotated with the coastal cities it passes
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found {
        path: Vec<String>,
        cost: f64,
        touches_coastal: bool,
        coastal_nodes: Vec<String>,
    },
    Unreachable,
}

impl RouteOutcome {
    /// Attach coastal membership to a path result
    pub fn from_path(result: PathResult, coastal: &CoastalSet) -> Self {
        match result {
            PathResult::Found { path, cost } => {
                let coastal_nodes = coastal_on_path(&path, coastal);
                RouteOutcome::Found {
                    touches_coastal: !coastal_nodes.is_empty(),
                    path,
                    cost,
                    coastal_nodes,
                }
            }
            PathResult::Unreachable => RouteOutcome::Unreachable,
        }
    }
}


/// Path nodes that are coastal, in path order
fn coastal_on_path(path: &[String], coastal: &CoastalSet) -> Vec<String> {
    path.iter().filter(|city| coastal.contains(*city)).cloned().collect()
}


/// Found route with its derived metrics
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedRoute {
    pub path: Vec<String>,
    pub cost: f64,
    /// Number of edges traversed
    pub hops: usize,
    /// `cost` scaled by a fixed factor, illustrative only
    pub time_estimate: f64,
    pub coastal_nodes: Vec<String>,
    /// At least one coastal city on the path
    pub valid: bool,
}

/// Derive hop count, time estimate and coastal cities for a found path
/// Returns None for an unreachable result.
pub fn enrich(result: &PathResult, coastal: &CoastalSet) -> Option<EnrichedRoute> {
    enrich_with_factor(result, coastal, DEFAULT_TIME_ESTIMATE_FACTOR)
}

pub fn enrich_with_factor(result: &PathResult, coastal: &CoastalSet, time_factor: f64) -> Option<EnrichedRoute> {
    let PathResult::Found { path, cost } = result else {
        return None;
    };
    let coastal_nodes = coastal_on_path(path, coastal);

    Some(EnrichedRoute {
        path: path.clone(),
        cost: *cost,
        hops: path.len().saturating_sub(1),
        time_estimate: cost * time_factor,
        valid: !coastal_nodes.is_empty(),
        coastal_nodes,
    })
}
