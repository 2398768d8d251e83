//! Shortest-path search and route planning
//!
//! [`RoutePlanner`] is the entry point. The lower layers are public for
//! callers that want to run the search on a graph of their own.

pub mod congestion;
pub mod dijkstra;
pub mod path;
pub mod planner;
pub mod route;

pub use congestion::{CongestionWeights, congestion_multiplier};
pub use path::{PathStep, ShortestPath, reconstruct_path, shortest_path};
pub use planner::{
    AvailableLink, DistanceComparison, GraphSummary, NodeResolution, ResolvedNode, RoutePlanner,
    SpotRoute,
};
pub use route::{CongestionComparison, Route, RouteOutcome, RouteStep, WeightMode};
