//! Read-only view of the venue records used by one planning request

use geo::{Distance, Euclidean, Point};
use hashbrown::HashMap;
use itertools::Itertools;

use crate::{Error, LinkId, MapLink, MapNode, NodeId, PointOfInterest, SpotId};

/// Consistent copy of the node, link and point-of-interest tables.
///
/// The surrounding CRUD layer owns the records; a snapshot is taken once at
/// the start of a request and is never mutated while routing.
#[derive(Debug, Clone)]
pub struct VenueSnapshot {
    nodes: Vec<MapNode>,
    links: Vec<MapLink>,
    spots: Vec<PointOfInterest>,
    node_lookup: HashMap<NodeId, usize>,
    spot_lookup: HashMap<SpotId, usize>,
}

impl VenueSnapshot {
    /// Validates and indexes the tables.
    ///
    /// # Errors
    ///
    /// Data integrity errors: duplicated ids, non-finite coordinates, link
    /// costs that are not positive, links or spots pointing at missing nodes,
    /// nodes pointing at missing spots.
    pub fn new(
        nodes: Vec<MapNode>,
        links: Vec<MapLink>,
        spots: Vec<PointOfInterest>,
    ) -> Result<Self, Error> {
        if let Some(id) = nodes.iter().map(|n| n.id).duplicates().next() {
            return Err(Error::DuplicateNode(id));
        }
        if let Some(id) = links.iter().map(|l| l.id).duplicates().next() {
            return Err(Error::DuplicateLink(id));
        }
        if let Some(id) = spots.iter().map(|s| s.id).duplicates().next() {
            return Err(Error::DuplicateSpot(id));
        }

        let node_lookup: HashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();
        let spot_lookup: HashMap<SpotId, usize> = spots
            .iter()
            .enumerate()
            .map(|(idx, spot)| (spot.id, idx))
            .collect();

        for node in &nodes {
            node.validate()?;
        }

        for link in &links {
            link.validate()?;
            for endpoint in [link.from, link.to] {
                if !node_lookup.contains_key(&endpoint) {
                    return Err(Error::DanglingLink {
                        link: link.id,
                        node: endpoint,
                    });
                }
            }
        }

        for spot in &spots {
            if let Some(node) = spot.node {
                if !node_lookup.contains_key(&node) {
                    return Err(Error::DanglingSpot {
                        spot: spot.id,
                        node,
                    });
                }
            }
        }

        for node in &nodes {
            if let Some(spot) = node.spot {
                if !spot_lookup.contains_key(&spot) {
                    return Err(Error::DanglingSpotReference {
                        node: node.id,
                        spot,
                    });
                }
            }
        }

        Ok(Self {
            nodes,
            links,
            spots,
            node_lookup,
            spot_lookup,
        })
    }

    pub fn nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[MapLink] {
        &self.links
    }

    pub fn spots(&self) -> &[PointOfInterest] {
        &self.spots
    }

    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.node_lookup.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_lookup.contains_key(&id)
    }

    pub fn spot(&self, id: SpotId) -> Option<&PointOfInterest> {
        self.spot_lookup.get(&id).map(|&idx| &self.spots[idx])
    }

    pub fn link(&self, id: LinkId) -> Option<&MapLink> {
        self.links.iter().find(|link| link.id == id)
    }

    /// Display name of a node, empty when the node is unknown
    pub fn node_name(&self, id: NodeId) -> &str {
        self.node(id).map_or("", |node| node.name.as_str())
    }

    /// Node closest to `point` by straight-line distance, with that distance.
    ///
    /// Plain linear scan; ties go to the node listed first.
    pub fn nearest_node(&self, point: Point<f64>) -> Option<(&MapNode, f64)> {
        let mut best: Option<(&MapNode, f64)> = None;
        for node in &self.nodes {
            let distance = Euclidean.distance(point, node.position);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((node, distance));
            }
        }
        best
    }

    /// Straight-line distance between two nodes
    pub fn straight_line_distance(&self, a: NodeId, b: NodeId) -> Result<f64, Error> {
        let a = self.node(a).ok_or(Error::UnknownNode(a))?;
        let b = self.node(b).ok_or(Error::UnknownNode(b))?;
        Ok(Euclidean.distance(a.position, b.position))
    }
}
