use geo::Point;
use serde::Deserialize;

use super::parser::deserialize_flag;
use crate::{Cost, LinkId, MapLink, MapNode, NodeId, PointOfInterest, SpotId};

#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub congestion: Option<i32>,
    #[serde(default)]
    pub tourist_spot_id: Option<SpotId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
    pub distance: Cost,
    /// Empty means the link weighs its distance
    #[serde(default)]
    pub weight: Option<Cost>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_directed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotRecord {
    pub id: SpotId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nearest_node_id: Option<NodeId>,
    pub x: f64,
    pub y: f64,
    pub max_capacity: u32,
    #[serde(default)]
    pub current_count: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_open: Option<bool>,
}

impl From<NodeRecord> for MapNode {
    fn from(record: NodeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            position: Point::new(record.x, record.y),
            congestion: record.congestion.unwrap_or(0),
            spot: record.tourist_spot_id,
        }
    }
}

impl From<LinkRecord> for MapLink {
    fn from(record: LinkRecord) -> Self {
        Self {
            id: record.id,
            from: record.from_node_id,
            to: record.to_node_id,
            distance: record.distance,
            weight: record.weight.unwrap_or(record.distance),
            directed: record.is_directed.unwrap_or(false),
        }
    }
}

impl From<SpotRecord> for PointOfInterest {
    fn from(record: SpotRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            node: record.nearest_node_id,
            position: Point::new(record.x, record.y),
            max_capacity: record.max_capacity,
            current_count: record.current_count.unwrap_or(0),
            is_open: record.is_open.unwrap_or(true),
        }
    }
}
