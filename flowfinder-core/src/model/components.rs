//! Map components - nodes and links

use geo::Point;

use crate::{Cost, Error, LinkId, NodeId, SpotId};

/// Point on the venue map
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub id: NodeId,
    /// Display name shown to visitors
    pub name: String,
    /// Planar map coordinates, same space as link distances
    pub position: Point<f64>,
    /// Informational congestion indicator maintained by staff
    pub congestion: i32,
    /// Point of interest this node belongs to, if any
    pub spot: Option<SpotId>,
}

impl MapNode {
    pub fn new(id: NodeId, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            name: name.into(),
            position: Point::new(x, y),
            congestion: 0,
            spot: None,
        }
    }

    #[must_use]
    pub fn with_spot(mut self, spot: SpotId) -> Self {
        self.spot = Some(spot);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.position.x().is_finite() && self.position.y().is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidCoordinates(self.id))
        }
    }
}

/// Weighted connection between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct MapLink {
    pub id: LinkId,
    pub from: NodeId,
    pub to: NodeId,
    /// Physical length of the passage
    pub distance: Cost,
    /// Routing cost, equal to `distance` unless set explicitly
    pub weight: Cost,
    /// `false` means the link can be walked both ways at the same cost
    pub directed: bool,
}

impl MapLink {
    /// Undirected link whose weight equals its distance
    pub fn new(id: LinkId, from: NodeId, to: NodeId, distance: Cost) -> Self {
        Self {
            id,
            from,
            to,
            distance,
            weight: distance,
            directed: false,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: Cost) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn one_way(mut self) -> Self {
        self.directed = true;
        self
    }

    /// Whether the link can be walked from `from` to `to`
    pub fn connects(&self, from: NodeId, to: NodeId) -> bool {
        (self.from == from && self.to == to) || (!self.directed && self.from == to && self.to == from)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        for (field, value) in [("distance", self.distance), ("weight", self.weight)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidLinkCost {
                    link: self.id,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_link_connects_both_ways() {
        let link = MapLink::new(1, 10, 20, 3.0);
        assert!(link.connects(10, 20));
        assert!(link.connects(20, 10));
        assert!(!link.connects(10, 30));
    }

    #[test]
    fn one_way_link_connects_forward_only() {
        let link = MapLink::new(1, 10, 20, 3.0).one_way();
        assert!(link.connects(10, 20));
        assert!(!link.connects(20, 10));
    }

    #[test]
    fn rejects_non_positive_weight() {
        let link = MapLink::new(7, 1, 2, 4.0).with_weight(0.0);
        assert!(matches!(
            link.validate(),
            Err(Error::InvalidLinkCost { link: 7, field: "weight", .. })
        ));

        let link = MapLink::new(8, 1, 2, f64::NAN);
        assert!(matches!(
            link.validate(),
            Err(Error::InvalidLinkCost { link: 8, field: "distance", .. })
        ));
    }

    #[test]
    fn rejects_infinite_coordinates() {
        let node = MapNode::new(3, "gate", f64::INFINITY, 0.0);
        assert!(matches!(node.validate(), Err(Error::InvalidCoordinates(3))));
    }
}
