//! Route engine facade over a [`CityStore`].
//!
//! Every call reads a fresh snapshot from the store and rebuilds the graph, so
//! results always reflect the current cities and routes. Nothing is cached.

use crate::collections::CoastalSet;
use crate::config::EngineConfig;
use crate::errors::RouteError;
use crate::graph::{CityGraph, Connection, GraphSnapshot};
use crate::route::{EnrichedRoute, RouteOutcome, enrich_with_factor, shortest_path};
use crate::stats::{GraphStats, aggregate};
use crate::store::CityStore;

use serde::Serialize;
use tracing::{debug, info};


/// Validated and enriched route request
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoutePlan {
    Planned(EnrichedRoute),
    Unreachable { origin: String, destination: String },
}


pub struct RouteEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: CityStore> RouteEngine<S> {

    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn build_graph(&self) -> Result<CityGraph, RouteError> {
        let edges = self.store.list_edges()?;
        Ok(CityGraph::build(&edges))
    }

    fn coastal_set(&self) -> Result<CoastalSet, RouteError> {
        Ok(self.store.list_nodes()?
            .into_iter()
            .filter(|city| city.is_coastal)
            .map(|city| city.name)
            .collect())
    }

    /// Least-cost route with its coastal cities
    ///
    /// Endpoints are not validated: an unknown city is reported as
    /// `RouteOutcome::Unreachable`. Only storage failures are errors.
    pub fn compute_route(&self, origin: &str, destination: &str) -> Result<RouteOutcome, RouteError> {
        let graph = self.build_graph()?;
        let coastal = self.coastal_set()?;

        let outcome = RouteOutcome::from_path(shortest_path(&graph, origin, destination), &coastal);
        match &outcome {
            RouteOutcome::Found { cost, path, .. } => {
                debug!(origin, destination, cost, hops = path.len().saturating_sub(1), "route found");
            }
            RouteOutcome::Unreachable => debug!(origin, destination, "no route"),
        }
        Ok(outcome)
    }

    /// Check a route request before running the search
    /// Missing names, identical endpoints, then existence of each city.
    pub fn validate_endpoints(&self, origin: &str, destination: &str) -> Result<(), RouteError> {
        if origin.is_empty() || destination.is_empty() {
            return Err(RouteError::MissingEndpoint);
        }
        if origin == destination {
            return Err(RouteError::SameEndpoints);
        }
        if !self.store.node_exists(origin)? {
            return Err(RouteError::UnknownOrigin(origin.to_string()));
        }
        if !self.store.node_exists(destination)? {
            return Err(RouteError::UnknownDestination(destination.to_string()));
        }
        Ok(())
    }

    /// Validate, search and enrich a route request
    pub fn plan_route(&self, origin: &str, destination: &str) -> Result<RoutePlan, RouteError> {
        self.validate_endpoints(origin, destination)?;

        let graph = self.build_graph()?;
        let coastal = self.coastal_set()?;
        let result = shortest_path(&graph, origin, destination);

        let plan = match enrich_with_factor(&result, &coastal, self.config.time_estimate_factor) {
            Some(route) => {
                info!(origin, destination, cost = route.cost, valid = route.valid, "route planned");
                RoutePlan::Planned(route)
            }
            None => {
                info!(origin, destination, "destination unreachable");
                RoutePlan::Unreachable { origin: origin.to_string(), destination: destination.to_string() }
            }
        };
        Ok(plan)
    }

    /// Plan the configured default route
    pub fn showcase_route(&self) -> Result<RoutePlan, RouteError> {
        self.plan_route(&self.config.default_origin, &self.config.default_destination)
    }

    pub fn compute_statistics(&self) -> Result<GraphStats, RouteError> {
        let nodes = self.store.list_nodes()?;
        let edges = self.store.list_edges()?;
        Ok(aggregate(&nodes, &edges, self.config.stats_precision))
    }

    /// Nodes and edges for visualisation or export
    pub fn graph_snapshot(&self) -> Result<GraphSnapshot, RouteError> {
        Ok(self.build_graph()?.snapshot())
    }

    /// Cities directly connected to `city` with the route cost
    /// Both directions of every stored route are considered.
    pub fn connections_from(&self, city: &str) -> Result<Vec<(String, f64)>, RouteError> {
        let edges = self.store.list_edges()?;
        Ok(edges.into_iter()
            .filter_map(|edge| {
                if edge.origin == city {
                    Some((edge.destination, edge.cost))
                } else if edge.destination == city {
                    Some((edge.origin, edge.cost))
                } else {
                    None
                }
            })
            .collect())
    }

    pub fn all_connections(&self) -> Result<Vec<Connection>, RouteError> {
        Ok(self.store.list_edges()?)
    }

    /// True if a route joins the two cities in either direction
    pub fn connection_exists(&self, a: &str, b: &str) -> Result<bool, RouteError> {
        Ok(self.build_graph()?.edge_exists(a, b))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine() -> RouteEngine<MemoryStore> {
        let mut store = MemoryStore::new();
        store.add_province("Imbabura").unwrap();
        store.add_province("Pichincha").unwrap();
        store.add_province("Loja").unwrap();
        store.add_city("Ibarra", false, "Imbabura").unwrap();
        store.add_city("Quito", false, "Pichincha").unwrap();
        store.add_city("Loja", false, "Loja").unwrap();
        store.add_route("Ibarra", "Quito", 4.0).unwrap();
        store.add_route("Quito", "Loja", 10.0).unwrap();
        store.add_route("Ibarra", "Loja", 20.0).unwrap();
        RouteEngine::new(store, EngineConfig::default())
    }

    #[test]
    fn test_validation_order() {
        let engine = engine();

        assert!(matches!(engine.validate_endpoints("", "Loja"), Err(RouteError::MissingEndpoint)));
        assert!(matches!(engine.validate_endpoints("Loja", ""), Err(RouteError::MissingEndpoint)));
        // blank but not empty is an unknown city
        assert!(matches!(engine.validate_endpoints(" ", "Loja"), Err(RouteError::UnknownOrigin(_))));
        assert!(matches!(engine.validate_endpoints("Loja", "Loja"), Err(RouteError::SameEndpoints)));
        assert!(matches!(engine.validate_endpoints("Cuenca", "Loja"), Err(RouteError::UnknownOrigin(_))));
        assert!(matches!(engine.validate_endpoints("Loja", "Cuenca"), Err(RouteError::UnknownDestination(_))));
        assert!(engine.validate_endpoints("Ibarra", "Loja").is_ok());
    }

    #[test]
    fn test_compute_route_does_not_validate() {
        let engine = engine();

        assert_eq!(engine.compute_route("Cuenca", "Loja").unwrap(), RouteOutcome::Unreachable);
    }

    #[test]
    fn test_showcase_route() {
        let RoutePlan::Planned(route) = engine().showcase_route().unwrap() else {
            panic!("expected a planned route");
        };

        assert_eq!(route.path, vec!["Ibarra", "Quito", "Loja"]);
        assert_eq!(route.cost, 14.0);
        assert_eq!(route.hops, 2);
        assert_eq!(route.time_estimate, 28.0);
        assert!(!route.valid);
    }

    #[test]
    fn test_configured_time_factor() {
        let mut engine = engine();
        engine.config.time_estimate_factor = 0.5;

        let RoutePlan::Planned(route) = engine.plan_route("Ibarra", "Quito").unwrap() else {
            panic!("expected a planned route");
        };

        assert_eq!(route.time_estimate, 2.0);
    }

    #[test]
    fn test_connections_from() {
        let engine = engine();

        let mut connections = engine.connections_from("Loja").unwrap();
        connections.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(connections, vec![("Ibarra".to_string(), 20.0), ("Quito".to_string(), 10.0)]);
        assert!(engine.connections_from("Cuenca").unwrap().is_empty());
    }

    #[test]
    fn test_connection_exists() {
        let engine = engine();

        assert!(engine.connection_exists("Loja", "Quito").unwrap());
        assert!(engine.connection_exists("Quito", "Loja").unwrap());
        assert!(!engine.connection_exists("Quito", "Cuenca").unwrap());
    }

    #[test]
    fn test_plan_serializes_with_status_tag() {
        let plan = RoutePlan::Unreachable { origin: "A".into(), destination: "B".into() };

        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["status"], "unreachable");
        assert_eq!(json["origin"], "A");
    }
}
