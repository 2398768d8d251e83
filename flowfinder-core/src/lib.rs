//! Route planning over a schematic venue map.
//!
//! A request reads a [`VenueSnapshot`] (nodes, links and points of interest),
//! builds a fresh [`RouteGraph`] from it, optionally raises the cost of edges
//! leading into crowded attractions, runs Dijkstra and reconstructs the path.
//! Nothing is cached between requests.

pub mod config;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use config::RoutingConfig;
pub use error::Error;
pub use loading::{SnapshotConfig, load_snapshot};
pub use model::{MapLink, MapNode, PointOfInterest, RouteGraph, VenueSnapshot};
pub use routing::{RouteOutcome, RoutePlanner, WeightMode};

/// Identifier of a map node
pub type NodeId = u32;
/// Identifier of a link between two nodes
pub type LinkId = u32;
/// Identifier of a point of interest (tourist spot)
pub type SpotId = u32;
/// Non-negative traversal cost in map distance units
pub type Cost = f64;
