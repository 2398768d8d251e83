pub use crate::config::RoutingConfig;
pub use crate::error::Error;

// Venue records and the graph built from them
pub use crate::loading::{SnapshotConfig, load_snapshot};
pub use crate::model::{
    CongestionLevel, MapLink, MapNode, PointOfInterest, RouteGraph, VenueSnapshot,
};

// Planning
pub use crate::routing::{
    NodeResolution, ResolvedNode, Route, RouteOutcome, RoutePlanner, RouteStep, SpotRoute,
    WeightMode,
};

pub use crate::Cost;
pub use crate::LinkId;
pub use crate::NodeId;
pub use crate::SpotId;
