//! Raising the cost of passages that lead into crowded points of interest

use hashbrown::HashMap;
use log::debug;

use crate::{NodeId, PointOfInterest, RouteGraph, VenueSnapshot};

/// Cost multiplier for a destination with the given occupancy ratio.
///
/// Ratios are clamped to `[0, 1]`, so with the default penalty of `0.5` a
/// full destination costs at most 1.5 times its base cost.
pub fn congestion_multiplier(ratio: f64, penalty: f64) -> f64 {
    1.0 + ratio.clamp(0.0, 1.0) * penalty
}

/// Per-node multipliers taken from one occupancy snapshot
#[derive(Debug, Clone, Default)]
pub struct CongestionWeights {
    multipliers: HashMap<NodeId, f64>,
}

impl CongestionWeights {
    /// Collects multipliers for every node hosting a point of interest.
    ///
    /// A node counts as hosting a spot when the spot names it as its node or
    /// the node refers back to the spot. Spots with zero capacity are left
    /// out. When several spots share a node the most crowded one applies.
    pub fn from_snapshot(snapshot: &VenueSnapshot, penalty: f64) -> Self {
        let hosted = snapshot
            .spots()
            .iter()
            .filter_map(|spot| spot.node.map(|node| (node, spot)))
            .chain(snapshot.nodes().iter().filter_map(|node| {
                node.spot
                    .and_then(|id| snapshot.spot(id))
                    .map(|spot| (node.id, spot))
            }));
        Self::from_hosted(hosted, penalty)
    }

    /// Multipliers for spots at their explicitly associated nodes
    pub fn from_spots<'a>(
        spots: impl IntoIterator<Item = &'a PointOfInterest>,
        penalty: f64,
    ) -> Self {
        let hosted = spots
            .into_iter()
            .filter_map(|spot| spot.node.map(|node| (node, spot)));
        Self::from_hosted(hosted, penalty)
    }

    fn from_hosted<'a>(
        hosted: impl Iterator<Item = (NodeId, &'a PointOfInterest)>,
        penalty: f64,
    ) -> Self {
        let mut multipliers = HashMap::new();
        for (node, spot) in hosted {
            let Some(ratio) = spot.congestion_ratio() else {
                debug!(
                    "Point of interest {} has no capacity, not adjusting node {node}",
                    spot.id
                );
                continue;
            };
            let multiplier = congestion_multiplier(ratio, penalty);
            multipliers
                .entry(node)
                .and_modify(|current: &mut f64| *current = current.max(multiplier))
                .or_insert(multiplier);
        }
        Self { multipliers }
    }

    /// Multiplier for passages entering `node`, `1.0` when it hosts no spot
    pub fn multiplier(&self, node: NodeId) -> f64 {
        self.multipliers.get(&node).copied().unwrap_or(1.0)
    }

    /// Number of adjusted nodes
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    /// Adjusted copy of `graph`.
    ///
    /// Costs are recomputed from each passage's base cost, so applying the
    /// same weights again yields the same graph. Topology is untouched.
    pub fn apply(&self, graph: &RouteGraph) -> RouteGraph {
        graph.map_costs(|to, passage| passage.base_cost * self.multiplier(to))
    }
}
