use thiserror::Error;

use crate::{Cost, LinkId, NodeId, SpotId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source and target must be different nodes (got {0} twice)")]
    SameEndpoints(NodeId),
    #[error("Origin and destination must be different points of interest (got {0} twice)")]
    SameSpots(SpotId),
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Unknown point of interest: {0}")]
    UnknownSpot(SpotId),
    #[error("The node table is empty")]
    NoNodes,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Link {link} references missing node {node}")]
    DanglingLink { link: LinkId, node: NodeId },
    #[error("Point of interest {spot} references missing node {node}")]
    DanglingSpot { spot: SpotId, node: NodeId },
    #[error("Node {node} refers to missing point of interest {spot}")]
    DanglingSpotReference { node: NodeId, spot: SpotId },
    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),
    #[error("Duplicate link id {0}")]
    DuplicateLink(LinkId),
    #[error("Duplicate point of interest id {0}")]
    DuplicateSpot(SpotId),
    #[error("Link {link} has invalid {field} {value} (must be finite and positive)")]
    InvalidLinkCost {
        link: LinkId,
        field: &'static str,
        value: f64,
    },
    #[error("Node {0} has non-finite coordinates")]
    InvalidCoordinates(NodeId),

    #[error("Edge of link {link} carries invalid cost {cost}")]
    InvalidEdgeCost { link: LinkId, cost: Cost },
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Predecessor chain towards node {0} is broken")]
    BrokenPredecessorChain(NodeId),

    #[error("Point of interest {spot} cannot admit {requested} visitors ({current}/{capacity})")]
    CapacityExceeded {
        spot: SpotId,
        requested: u32,
        current: u32,
        capacity: u32,
    },
    #[error("Point of interest {spot} cannot release {requested} visitors (only {current} present)")]
    OccupancyUnderflow {
        spot: SpotId,
        requested: u32,
        current: u32,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}

impl Error {
    /// Whether the error points at corrupt upstream records rather than a bad request
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Error::DanglingLink { .. }
                | Error::DanglingSpot { .. }
                | Error::DanglingSpotReference { .. }
                | Error::DuplicateNode(_)
                | Error::DuplicateLink(_)
                | Error::DuplicateSpot(_)
                | Error::InvalidLinkCost { .. }
                | Error::InvalidCoordinates(_)
        )
    }
}
