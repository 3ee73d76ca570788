//! City and route storage the engine reads from.
//!
//! The engine only sees flat lists through [`CityStore`]. [`MemoryStore`] is an
//! in-memory implementation that also owns the validation rules for provinces,
//! cities and routes.

use crate::errors::StoreError;
use crate::graph::Connection;

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};


/// Longest accepted province or city name, in characters
pub const MAX_NAME_LEN: usize = 100;


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub name: String,
    pub is_coastal: bool,
    pub province_id: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: u32,
    pub origin_id: u32,
    pub destination_id: u32,
    pub cost: f64,
}


/// Read access the route engine needs from city storage
pub trait CityStore {
    /// All cities in canonical order
    fn list_nodes(&self) -> Result<Vec<City>, StoreError>;

    /// All routes, once each
    fn list_edges(&self) -> Result<Vec<Connection>, StoreError>;

    /// Exact-name lookup
    fn node_exists(&self, name: &str) -> Result<bool, StoreError>;
}

impl<S: CityStore + ?Sized> CityStore for &S {
    fn list_nodes(&self) -> Result<Vec<City>, StoreError> {
        (**self).list_nodes()
    }

    fn list_edges(&self) -> Result<Vec<Connection>, StoreError> {
        (**self).list_edges()
    }

    fn node_exists(&self, name: &str) -> Result<bool, StoreError> {
        (**self).node_exists(name)
    }
}


/// Dataset file layout
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Dataset {
    provinces: Vec<String>,
    cities: Vec<CityRecord>,
    routes: Vec<Connection>,
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    name: String,
    #[serde(default)]
    coastal: bool,
    province: String,
}


/// In-memory city store
#[derive(Debug, Default)]
pub struct MemoryStore {
    provinces: Vec<Province>,
    cities: Vec<City>,
    routes: Vec<Route>,
    next_id: u32,
    unavailable: bool,
}

impl MemoryStore {

    pub fn new() -> Self {
        Self::default()
    }

    /// Load provinces, cities and routes from a JSON document
    /// Every record goes through the same validation as the add methods.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        let mut store = Self::new();

        for province in &dataset.provinces {
            store.add_province(province)?;
        }
        for city in &dataset.cities {
            store.add_city(&city.name, city.coastal, &city.province)?;
        }
        for route in &dataset.routes {
            store.add_route(&route.origin, &route.destination, route.cost)?;
        }

        info!(
            provinces = store.provinces.len(),
            cities = store.cities.len(),
            routes = store.routes.len(),
            "loaded dataset"
        );
        Ok(store)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Simulate a storage outage, every read fails while set
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable { reason: "store marked unavailable".into() });
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_province(&mut self, name: &str) -> Result<u32, StoreError> {
        validate_name("province", name)?;
        if self.provinces.iter().any(|p| same_name(&p.name, name)) {
            return Err(StoreError::DuplicateProvince(name.to_string()));
        }
        let id = self.allocate_id();
        self.provinces.push(Province { id, name: name.to_string() });
        Ok(id)
    }

    pub fn rename_province(&mut self, name: &str, new_name: &str) -> Result<(), StoreError> {
        validate_name("province", new_name)?;
        let id = self.province_id(name)?;
        if self.provinces.iter().any(|p| p.id != id && same_name(&p.name, new_name)) {
            return Err(StoreError::DuplicateProvince(new_name.to_string()));
        }
        if let Some(province) = self.provinces.iter_mut().find(|p| p.id == id) {
            province.name = new_name.to_string();
        }
        Ok(())
    }

    /// Remove a province, refused while any city belongs to it
    pub fn remove_province(&mut self, name: &str) -> Result<Province, StoreError> {
        let id = self.province_id(name)?;
        if self.cities.iter().any(|c| c.province_id == id) {
            return Err(StoreError::ProvinceHasCities(name.to_string()));
        }
        let position = self.provinces.iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::UnknownProvince(name.to_string()))?;
        Ok(self.provinces.remove(position))
    }

    pub fn add_city(&mut self, name: &str, is_coastal: bool, province: &str) -> Result<u32, StoreError> {
        validate_name("city", name)?;
        if self.cities.iter().any(|c| same_name(&c.name, name)) {
            return Err(StoreError::DuplicateCity(name.to_string()));
        }
        let province_id = self.province_id(province)?;

        let id = self.allocate_id();
        self.cities.push(City { id, name: name.to_string(), is_coastal, province_id });
        Ok(id)
    }

    /// Replace a city's name, coastal flag and province
    /// Routes follow the city since they refer to it by id.
    pub fn update_city(
        &mut self,
        name: &str,
        new_name: &str,
        is_coastal: bool,
        province: &str,
    ) -> Result<(), StoreError> {
        validate_name("city", new_name)?;
        let id = self.city_id(name)?;
        if self.cities.iter().any(|c| c.id != id && same_name(&c.name, new_name)) {
            return Err(StoreError::DuplicateCity(new_name.to_string()));
        }
        let province_id = self.province_id(province)?;

        if let Some(city) = self.cities.iter_mut().find(|c| c.id == id) {
            city.name = new_name.to_string();
            city.is_coastal = is_coastal;
            city.province_id = province_id;
        }
        debug!(city = name, new_name, is_coastal, province, "city updated");
        Ok(())
    }

    /// Add an undirected route, at most one per pair of cities
    pub fn add_route(&mut self, origin: &str, destination: &str, cost: f64) -> Result<u32, StoreError> {
        let origin_id = self.city_id(origin)?;
        let destination_id = self.city_id(destination)?;
        if origin_id == destination_id {
            return Err(StoreError::SelfLoop(origin.to_string()));
        }
        validate_cost(cost)?;
        if self.route_between(origin_id, destination_id).is_some() {
            return Err(StoreError::DuplicateRoute(origin.to_string(), destination.to_string()));
        }

        let id = self.allocate_id();
        self.routes.push(Route { id, origin_id, destination_id, cost });
        debug!(origin, destination, cost, "route added");
        Ok(id)
    }

    pub fn update_route_cost(&mut self, route_id: u32, cost: f64) -> Result<(), StoreError> {
        validate_cost(cost)?;
        let route = self.routes.iter_mut()
            .find(|r| r.id == route_id)
            .ok_or(StoreError::UnknownRoute(route_id))?;
        route.cost = cost;
        Ok(())
    }

    pub fn remove_route(&mut self, route_id: u32) -> Result<Route, StoreError> {
        let position = self.routes.iter()
            .position(|r| r.id == route_id)
            .ok_or(StoreError::UnknownRoute(route_id))?;
        Ok(self.routes.remove(position))
    }

    /// Remove a city and every route touching it
    pub fn remove_city(&mut self, name: &str) -> Result<City, StoreError> {
        let id = self.city_id(name)?;
        let before = self.routes.len();
        self.routes.retain(|r| r.origin_id != id && r.destination_id != id);
        debug!(city = name, routes_removed = before - self.routes.len(), "city removed");

        let position = self.cities.iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::UnknownCity(name.to_string()))?;
        Ok(self.cities.remove(position))
    }

    /// Cities of a province ordered by name
    pub fn cities_in_province(&self, province: &str) -> Result<Vec<City>, StoreError> {
        let province_id = self.province_id(province)?;

        let mut cities: Vec<City> = self.cities.iter()
            .filter(|c| c.province_id == province_id)
            .cloned()
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route joining the two cities in either direction
    pub fn route_between(&self, a: u32, b: u32) -> Option<&Route> {
        self.routes.iter().find(|r| {
            (r.origin_id == a && r.destination_id == b) || (r.origin_id == b && r.destination_id == a)
        })
    }

    fn province_id(&self, name: &str) -> Result<u32, StoreError> {
        self.provinces.iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .ok_or_else(|| StoreError::UnknownProvince(name.to_string()))
    }

    fn city_id(&self, name: &str) -> Result<u32, StoreError> {
        self.cities.iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .ok_or_else(|| StoreError::UnknownCity(name.to_string()))
    }

    fn city_name(&self, id: u32) -> Option<&str> {
        self.cities.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }
}

impl CityStore for MemoryStore {

    /// Cities ordered by name
    fn list_nodes(&self) -> Result<Vec<City>, StoreError> {
        self.check_available()?;
        let mut cities = self.cities.clone();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }

    /// Routes in creation order
    fn list_edges(&self) -> Result<Vec<Connection>, StoreError> {
        self.check_available()?;
        Ok(self.routes.iter()
            .filter_map(|r| {
                let origin = self.city_name(r.origin_id)?;
                let destination = self.city_name(r.destination_id)?;
                Some(Connection::new(origin, destination, r.cost))
            })
            .collect())
    }

    fn node_exists(&self, name: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.cities.iter().any(|c| c.name == name))
    }
}


fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Spanish letters accepted besides ASCII
const ACCENTED_LETTERS: &str = "áéíóúÁÉÍÓÚüÜñÑ";

/// Latin letters and single inner spaces only
fn validate_name(kind: &'static str, name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::EmptyName { kind });
    }
    let well_formed = name.chars().count() <= MAX_NAME_LEN
        && name.trim() == name
        && !name.contains("  ")
        && name.chars().all(|c| c.is_ascii_alphabetic() || ACCENTED_LETTERS.contains(c) || c == ' ');
    if !well_formed {
        return Err(StoreError::InvalidName { kind, name: name.to_string() });
    }
    Ok(())
}

fn validate_cost(cost: f64) -> Result<(), StoreError> {
    if !cost.is_finite() || cost <= 0.0 {
        return Err(StoreError::InvalidCost(cost));
    }
    Ok(())
}
