use crate::collections::{FxIndexMap, FxIndexSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};


/// Undirected weighted connection between two cities
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub origin: String,
    pub destination: String,
    pub cost: f64,
}

impl Connection {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, cost: f64) -> Self {
        Self { origin: origin.into(), destination: destination.into(), cost }
    }
}


/// Nodes and edges of a graph, edges listed once each
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    pub edges: Vec<Connection>,
}


/// Undirected weighted graph of cities
///
/// Nodes are keyed by city name (case-sensitive) and only exist if at least one
/// edge touches them. Iteration order follows edge insertion order, which keeps
/// every query over the graph deterministic.
#[derive(Clone, Debug, Default)]
pub struct CityGraph {
    nodes: FxIndexSet<String>,
    adjacency: Vec<FxIndexMap<usize, f64>>, // indexed like `nodes`
}

impl CityGraph {

    /// Build a graph from a list of edges
    ///
    /// A repeated unordered pair overwrites the earlier cost (last write wins).
    /// Costs are stored as given, self-loops are dropped.
    pub fn build<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Connection>,
    {
        let mut graph = Self::default();
        for edge in edges {
            graph.insert_edge(&edge.origin, &edge.destination, edge.cost);
        }
        debug!(nodes = graph.node_count(), edges = graph.edge_count(), "built city graph");
        graph
    }

    fn insert_edge(&mut self, a: &str, b: &str, cost: f64) {
        if a == b {
            warn!(city = a, "ignoring self-loop route");
            return;
        }
        let a_index = self.node_index_or_insert(a);
        let b_index = self.node_index_or_insert(b);

        if self.adjacency[a_index].insert(b_index, cost).is_some() {
            debug!(origin = a, destination = b, cost, "duplicate route, keeping last cost");
        }
        self.adjacency[b_index].insert(a_index, cost);
    }

    fn node_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(index) = self.nodes.get_index_of(name) {
            return index;
        }
        let (index, _) = self.nodes.insert_full(name.to_string());
        self.adjacency.push(FxIndexMap::default());
        index
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct unordered pairs
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|adjacent| adjacent.len()).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    pub(crate) fn name_of(&self, index: usize) -> Option<&str> {
        self.nodes.get_index(index).map(String::as_str)
    }

    /// Adjacent node indices with edge costs
    pub(crate) fn adjacent(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency.get(index).into_iter().flat_map(|adjacent| adjacent.iter().map(|(&n, &c)| (n, c)))
    }

    /// Adjacent cities with the cost of the connecting edge
    /// Empty if the city is not in the graph
    pub fn neighbors(&self, name: &str) -> Vec<(String, f64)> {
        let Some(index) = self.index_of(name) else {
            return Vec::new();
        };
        self.adjacent(index)
            .filter_map(|(n, cost)| self.name_of(n).map(|neighbor| (neighbor.to_string(), cost)))
            .collect()
    }

    /// True if an edge joins the two cities, argument order does not matter
    pub fn edge_exists(&self, a: &str, b: &str) -> bool {
        self.edge_cost(a, b).is_some()
    }

    pub fn edge_cost(&self, a: &str, b: &str) -> Option<f64> {
        let (a_index, b_index) = (self.index_of(a)?, self.index_of(b)?);
        self.adjacency[a_index].get(&b_index).copied()
    }

    /// Every edge once, oriented from the endpoint inserted first
    pub fn all_edges(&self) -> Vec<Connection> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (a_index, adjacent) in self.adjacency.iter().enumerate() {
            for (&b_index, &cost) in adjacent {
                if b_index <= a_index {
                    continue;
                }
                if let (Some(a), Some(b)) = (self.name_of(a_index), self.name_of(b_index)) {
                    edges.push(Connection::new(a, b, cost));
                }
            }
        }
        edges
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.iter().cloned().collect(),
            edges: self.all_edges(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ecuador() -> Vec<Connection> {
        vec![
            Connection::new("Ibarra", "Quito", 4.0),
            Connection::new("Quito", "Loja", 10.0),
            Connection::new("Ibarra", "Loja", 20.0),
        ]
    }

    #[test]
    fn test_build_creates_nodes_from_endpoints() {
        let graph = CityGraph::build(&ecuador());

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["Ibarra", "Quito", "Loja"]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_empty_graph() {
        let graph = CityGraph::build(&[]);

        assert_eq!(graph.node_count(), 0);
        assert!(graph.all_edges().is_empty());
        assert!(graph.neighbors("Quito").is_empty());
    }

    #[test]
    fn test_edges_are_symmetric() {
        let edges = ecuador();
        let graph = CityGraph::build(&edges);

        for edge in &edges {
            assert!(graph.edge_exists(&edge.origin, &edge.destination));
            assert!(graph.edge_exists(&edge.destination, &edge.origin));
            assert!(graph.neighbors(&edge.origin).contains(&(edge.destination.clone(), edge.cost)));
            assert!(graph.neighbors(&edge.destination).contains(&(edge.origin.clone(), edge.cost)));
        }
        assert!(!graph.edge_exists("Quito", "Cuenca"));
    }

    #[test]
    fn test_duplicate_pair_last_write_wins() {
        let edges = vec![
            Connection::new("Quito", "Loja", 10.0),
            Connection::new("Loja", "Quito", 7.5),
        ];
        let graph = CityGraph::build(&edges);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_cost("Quito", "Loja"), Some(7.5));
        assert_eq!(graph.edge_cost("Loja", "Quito"), Some(7.5));
        assert_eq!(graph.all_edges(), vec![Connection::new("Quito", "Loja", 7.5)]);
    }

    #[test]
    fn test_non_positive_costs_are_stored() {
        let edges = vec![Connection::new("A", "B", 0.0), Connection::new("B", "C", -3.0)];
        let graph = CityGraph::build(&edges);

        assert_eq!(graph.edge_cost("A", "B"), Some(0.0));
        assert_eq!(graph.edge_cost("C", "B"), Some(-3.0));
    }

    #[test]
    fn test_self_loop_is_dropped() {
        let edges = vec![Connection::new("A", "A", 1.0), Connection::new("A", "B", 2.0)];
        let graph = CityGraph::build(&edges);

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.edge_exists("A", "A"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let graph = CityGraph::build(&ecuador());

        assert!(graph.contains("Quito"));
        assert!(!graph.contains("quito"));
        assert!(graph.neighbors("quito").is_empty());
    }

    #[test]
    fn test_all_edges_lists_each_edge_once() {
        let graph = CityGraph::build(&ecuador());
        let edges = graph.all_edges();

        assert_eq!(edges.len(), 3);
        for edge in ecuador() {
            assert!(edges.contains(&edge), "missing {edge:?}");
        }
    }

    #[test]
    fn test_snapshot() {
        let snapshot = CityGraph::build(&ecuador()).snapshot();

        assert_eq!(snapshot.nodes, vec!["Ibarra", "Quito", "Loja"]);
        assert_eq!(snapshot.edges.len(), 3);
    }
}
