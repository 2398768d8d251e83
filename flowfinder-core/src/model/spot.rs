//! Points of interest (tourist spots) and their occupancy

use geo::Point;
use serde::Serialize;

use crate::{Error, NodeId, SpotId};

/// Attraction with an occupancy/capacity pair
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub id: SpotId,
    pub name: String,
    /// Explicitly associated (nearest) map node
    pub node: Option<NodeId>,
    /// Location of the attraction itself, used when no node is associated
    pub position: Point<f64>,
    pub max_capacity: u32,
    pub current_count: u32,
    pub is_open: bool,
}

/// Coarse crowd banding shown to visitors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Unknown,
    Quiet,
    SomewhatQuiet,
    Moderate,
    Crowded,
    VeryCrowded,
    Full,
}

impl CongestionLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r >= 1.0 => Self::Full,
            r if r >= 0.8 => Self::VeryCrowded,
            r if r >= 0.6 => Self::Crowded,
            r if r >= 0.4 => Self::Moderate,
            r if r >= 0.2 => Self::SomewhatQuiet,
            _ => Self::Quiet,
        }
    }
}

impl PointOfInterest {
    pub fn new(id: SpotId, name: impl Into<String>, x: f64, y: f64, max_capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            node: None,
            position: Point::new(x, y),
            max_capacity,
            current_count: 0,
            is_open: true,
        }
    }

    #[must_use]
    pub fn at_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    #[must_use]
    pub fn with_occupancy(mut self, current_count: u32) -> Self {
        self.current_count = current_count;
        self
    }

    /// Occupancy divided by capacity, `None` when capacity is zero
    pub fn congestion_ratio(&self) -> Option<f64> {
        (self.max_capacity > 0).then(|| f64::from(self.current_count) / f64::from(self.max_capacity))
    }

    pub fn congestion_level(&self) -> CongestionLevel {
        self.congestion_ratio()
            .map_or(CongestionLevel::Unknown, CongestionLevel::from_ratio)
    }

    /// Registers arriving visitors.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if the visitors would not fit; occupancy is left unchanged.
    pub fn admit(&mut self, count: u32) -> Result<(), Error> {
        match self.current_count.checked_add(count) {
            Some(total) if total <= self.max_capacity => {
                self.current_count = total;
                Ok(())
            }
            _ => Err(Error::CapacityExceeded {
                spot: self.id,
                requested: count,
                current: self.current_count,
                capacity: self.max_capacity,
            }),
        }
    }

    /// Registers leaving visitors.
    ///
    /// # Errors
    ///
    /// [`Error::OccupancyUnderflow`] if more visitors leave than are present.
    pub fn release(&mut self, count: u32) -> Result<(), Error> {
        let remaining = self
            .current_count
            .checked_sub(count)
            .ok_or(Error::OccupancyUnderflow {
                spot: self.id,
                requested: count,
                current: self.current_count,
            })?;
        self.current_count = remaining;
        Ok(())
    }
}
