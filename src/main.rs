use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use city_routes::{EngineConfig, MemoryStore, RouteEngine, RouteError, RoutePlan};


/// Least-cost routes between cities
#[derive(Parser)]
#[command(name = "city-routes", version, about)]
struct Cli {
    /// JSON dataset with provinces, cities and routes
    #[arg(short, long, env = "CITY_ROUTES_DATA")]
    data: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "CITY_ROUTES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cheapest route between two cities
    Route { origin: String, destination: String },
    /// Cheapest route between the configured default cities
    Showcase,
    /// Graph statistics
    Stats,
    /// Cities directly connected to a city
    Neighbors { city: String },
    /// Every route once
    Edges,
    /// Nodes and edges of the graph
    Snapshot,
}


fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();

    let store = MemoryStore::from_json_file(&cli.data)
        .with_context(|| format!("Failed to load dataset {}", cli.data.display()))?;
    let engine = RouteEngine::new(store, config);

    match cli.command {
        Command::Route { origin, destination } => report_plan(engine.plan_route(&origin, &destination)),
        Command::Showcase => report_plan(engine.showcase_route()),
        Command::Stats => print_json(&engine.compute_statistics()?),
        Command::Neighbors { city } => print_json(&engine.connections_from(&city)?),
        Command::Edges => print_json(&engine.all_connections()?),
        Command::Snapshot => print_json(&engine.graph_snapshot()?),
    }
}

/// Invalid input and unreachable destinations get distinct messages
fn report_plan(plan: Result<RoutePlan, RouteError>) -> Result<()> {
    match plan {
        Ok(plan @ RoutePlan::Planned(_)) => print_json(&plan),
        Ok(RoutePlan::Unreachable { origin, destination }) => {
            println!("No route exists between {origin} and {destination}");
            Ok(())
        }
        Err(err @ RouteError::DataUnavailable(_)) => Err(err).context("Route lookup failed"),
        Err(err) => anyhow::bail!("Invalid route request: {err}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}
