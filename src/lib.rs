//! Least-cost routes between cities.
//!
//! Cities are nodes of an undirected weighted graph, routes are its edges. The
//! graph is rebuilt from a [`CityStore`] on every query and searched with
//! Dijkstra's algorithm. Found routes are annotated with the coastal cities
//! they pass through.
//!
//! ```
//! use city_routes::{CityGraph, Connection, PathResult, shortest_path};
//!
//! let edges = vec![
//!     Connection::new("Ibarra", "Quito", 4.0),
//!     Connection::new("Quito", "Loja", 10.0),
//!     Connection::new("Ibarra", "Loja", 20.0),
//! ];
//! let graph = CityGraph::build(&edges);
//!
//! let PathResult::Found { path, cost } = shortest_path(&graph, "Ibarra", "Loja") else {
//!     panic!("Loja is reachable");
//! };
//! assert_eq!(path, vec!["Ibarra", "Quito", "Loja"]);
//! assert_eq!(cost, 14.0);
//! ```

pub mod collections;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod graph_algos;
pub mod route;
pub mod stats;
pub mod store;

pub use collections::CoastalSet;
pub use config::EngineConfig;
pub use engine::{RouteEngine, RoutePlan};
pub use errors::{PathPlannerError, RouteError, StoreError};
pub use graph::{CityGraph, Connection, GraphSnapshot};
pub use route::{EnrichedRoute, PathResult, RouteOutcome, enrich, shortest_path};
pub use stats::{GraphStats, aggregate, max_possible_edges};
pub use store::{City, CityStore, MemoryStore, Province, Route};
