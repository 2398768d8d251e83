//! Data model of the venue map
//!
//! Contains the record types read from the venue tables and the routing graph
//! derived from them.

pub mod components;
pub mod graph;
pub mod snapshot;
pub mod spot;

pub use components::{MapLink, MapNode};
pub use graph::{Passage, RouteGraph};
pub use snapshot::VenueSnapshot;
pub use spot::{CongestionLevel, PointOfInterest};
