use thiserror::Error;


/// Failures of the path search itself
#[derive(Debug, Error, PartialEq)]
pub enum PathPlannerError {
    #[error("no path found")]
    NoPathFound, // Unable to find a path to the goal
}


/// Failures raised by a city store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing storage could not be reached
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{kind} name cannot be empty")]
    EmptyName { kind: &'static str },

    /// Only letters and single spaces, no leading or trailing whitespace
    #[error("invalid {kind} name '{name}'")]
    InvalidName { kind: &'static str, name: String },

    #[error("province '{0}' already exists")]
    DuplicateProvince(String),

    #[error("city '{0}' already exists")]
    DuplicateCity(String),

    #[error("province '{0}' does not exist")]
    UnknownProvince(String),

    #[error("city '{0}' does not exist")]
    UnknownCity(String),

    #[error("province '{0}' still has cities")]
    ProvinceHasCities(String),

    #[error("origin and destination cannot be the same city ('{0}')")]
    SelfLoop(String),

    #[error("a route between '{0}' and '{1}' already exists")]
    DuplicateRoute(String, String),

    #[error("route cost must be a positive number, got {0}")]
    InvalidCost(f64),

    #[error("route {0} does not exist")]
    UnknownRoute(u32),
}


/// Errors reported to callers of the route engine
///
/// An unreachable destination is not an error, see `RouteOutcome::Unreachable`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("origin and destination are required")]
    MissingEndpoint,

    #[error("origin and destination cannot be the same")]
    SameEndpoints,

    #[error("origin city '{0}' does not exist")]
    UnknownOrigin(String),

    #[error("destination city '{0}' does not exist")]
    UnknownDestination(String),

    #[error("city data unavailable: {0}")]
    DataUnavailable(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for RouteError {
    fn from(error: toml::de::Error) -> Self {
        RouteError::Config(error.to_string())
    }
}
