use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use flowfinder_core::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "flowfinder")]
#[command(about = "Route planning over a venue map with congestion avoidance", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (defaults to ./flowfinder.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding nodes.csv, links.csv and optionally spots.csv
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Share of a passage cost added when its destination is full
    #[arg(long, global = true)]
    pub congestion_penalty: Option<f64>,

    /// Log filter, e.g. `debug` or `flowfinder_core=trace`; overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a route between two nodes
    Route {
        from: NodeId,
        to: NodeId,
        #[command(flatten)]
        output: RouteArgs,
    },
    /// Plan a route to a point of interest
    SpotRoute {
        #[command(flatten)]
        origin: SpotOrigin,
        #[arg(long)]
        to_spot: SpotId,
        #[command(flatten)]
        output: RouteArgs,
    },
    /// List passages leaving a node
    Links { node: NodeId },
    /// Compare straight-line and link distance between two nodes
    Distance { from: NodeId, to: NodeId },
    /// Print graph statistics
    Summary,
}

/// Exactly one of the two must be given
#[derive(Debug, Clone, Copy, Args)]
#[group(required = true, multiple = false)]
pub struct SpotOrigin {
    /// Start node
    #[arg(long)]
    pub from_node: Option<NodeId>,
    /// Start point of interest
    #[arg(long)]
    pub from_spot: Option<SpotId>,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct RouteArgs {
    /// Raise the cost of passages into crowded points of interest
    #[arg(long)]
    pub avoid_congestion: bool,
    /// Print the route as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,
}

impl RouteArgs {
    pub fn mode(self) -> WeightMode {
        if self.avoid_congestion {
            WeightMode::CongestionAware
        } else {
            WeightMode::Distance
        }
    }
}
