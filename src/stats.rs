//! Graph-wide figures for the dashboard.

use crate::graph::{CityGraph, Connection};
use crate::route::{PathResult, shortest_path};
use crate::store::City;

use serde::Serialize;
use tracing::debug;


/// Decimals kept in the sample average unless configured otherwise
pub const DEFAULT_STATS_PRECISION: u32 = 2;

/// More decimals than an f64 average can carry
pub const MAX_STATS_PRECISION: u32 = 15;


#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub coastal_count: usize,
    pub edge_count: usize,
    pub max_possible_edges: usize,
    /// Mean cost of a few sample routes, NOT the all-pairs average
    pub sample_average_cost: f64,
    /// City names in the order the samples were picked from
    pub cities: Vec<String>,
    pub graph_kind: &'static str,
}


/// Edges of a simple undirected graph on `n` nodes
pub fn max_possible_edges(n: usize) -> usize {
    if n <= 1 { 0 } else { n * (n - 1) / 2 }
}


/// Origin/destination pairs used for the cost sample
///
/// (first, last) and (second, second-to-last), or (first, second) when there
/// are exactly three cities. Fewer than three cities gives no sample.
pub fn sample_pairs(names: &[String]) -> Vec<(&str, &str)> {
    let n = names.len();
    if n < 3 {
        return Vec::new();
    }
    let second = if n > 3 {
        (names[1].as_str(), names[n - 2].as_str())
    } else {
        (names[0].as_str(), names[1].as_str())
    };
    vec![(names[0].as_str(), names[n - 1].as_str()), second]
}


/// Compute node, coastal and edge counts plus the sample average cost
///
/// `nodes` must be in canonical order, the sample pairs are picked by position.
/// Unreachable samples are left out of the average; with no successful sample
/// the average is 0.
pub fn aggregate(nodes: &[City], edges: &[Connection], precision: u32) -> GraphStats {
    let cities: Vec<String> = nodes.iter().map(|city| city.name.clone()).collect();
    let graph = CityGraph::build(edges);

    let costs: Vec<f64> = sample_pairs(&cities)
        .into_iter()
        .filter_map(|(origin, destination)| match shortest_path(&graph, origin, destination) {
            PathResult::Found { cost, .. } => Some(cost),
            PathResult::Unreachable => {
                debug!(origin, destination, "sample route unreachable, skipped");
                None
            }
        })
        .collect();

    let average = if costs.is_empty() {
        0.0
    } else {
        round_to(costs.iter().sum::<f64>() / costs.len() as f64, precision)
    };

    GraphStats {
        node_count: nodes.len(),
        coastal_count: nodes.iter().filter(|city| city.is_coastal).count(),
        edge_count: edges.len(),
        max_possible_edges: max_possible_edges(nodes.len()),
        sample_average_cost: average,
        cities,
        graph_kind: "undirected",
    }
}

/// Halves round to even, 1.125 becomes 1.12
fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_STATS_PRECISION) as i32);
    (value * scale).round_ties_even() / scale
}
