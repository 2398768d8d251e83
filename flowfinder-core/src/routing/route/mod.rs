//! Planned routes as returned to callers

mod to_geojson;

use serde::{Deserialize, Serialize};

use super::path::ShortestPath;
use crate::{Cost, LinkId, NodeId, VenueSnapshot};

/// Which costs a route is planned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightMode {
    /// Plain link weights
    #[default]
    Distance,
    /// Link weights raised for passages entering crowded points of interest
    CongestionAware,
}

/// One link of a route, decorated with node names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub from: NodeId,
    pub from_name: String,
    pub to: NodeId,
    pub to_name: String,
    pub link: LinkId,
    pub segment_cost: Cost,
    pub base_cost: Cost,
    pub distance: Cost,
}

/// Comparison of a congestion-aware route with the plain shortest route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CongestionComparison {
    /// Cost of the plain shortest route between the same endpoints
    pub baseline_cost: Option<Cost>,
    /// Extra unadjusted cost accepted to avoid congestion
    pub congestion_detour: Option<Cost>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub source: NodeId,
    pub target: NodeId,
    pub mode: WeightMode,
    /// Sum of `segment_cost` over all steps
    pub total_cost: Cost,
    /// Sum of unadjusted link weights
    pub base_cost: Cost,
    pub walking_distance: Cost,
    pub estimated_hours: f64,
    pub steps: Vec<RouteStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion: Option<CongestionComparison>,
}

impl Route {
    pub(crate) fn assemble(
        path: ShortestPath,
        snapshot: &VenueSnapshot,
        mode: WeightMode,
        walking_speed: f64,
        congestion: Option<CongestionComparison>,
    ) -> Self {
        let base_cost = path.base_length();
        let walking_distance = path.walking_distance();
        let steps = path
            .steps
            .iter()
            .map(|step| RouteStep {
                from: step.from,
                from_name: snapshot.node_name(step.from).to_owned(),
                to: step.to,
                to_name: snapshot.node_name(step.to).to_owned(),
                link: step.link,
                segment_cost: step.segment_cost,
                base_cost: step.base_cost,
                distance: step.distance,
            })
            .collect();

        Self {
            source: path.source,
            target: path.target,
            mode,
            total_cost: path.total_cost,
            base_cost,
            walking_distance,
            estimated_hours: walking_distance / walking_speed,
            steps,
            congestion,
        }
    }

    /// Visited nodes, source and target included
    pub fn node_ids(&self) -> Vec<NodeId> {
        std::iter::once(self.source)
            .chain(self.steps.iter().map(|step| step.to))
            .collect()
    }
}

/// Result of a planning request; an unreachable target is not an error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(Route),
    NoPath { source: NodeId, target: NodeId },
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(route) => Some(route),
            Self::NoPath { .. } => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            Self::Found(route) => Some(route),
            Self::NoPath { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
