//! Request-level orchestration: validation, graph build, weighting, search

use hashbrown::HashSet;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use super::congestion::CongestionWeights;
use super::path::shortest_path;
use super::route::{CongestionComparison, Route, RouteOutcome, WeightMode};
use crate::model::CongestionLevel;
use crate::{Cost, Error, LinkId, NodeId, RouteGraph, RoutingConfig, SpotId, VenueSnapshot};

/// How a point of interest was mapped onto a routable node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeResolution {
    /// The spot names its nearest node explicitly
    Associated,
    /// A node refers to the spot
    NodeBackReference,
    /// Geometrically closest node to the spot's own position
    Nearest { distance: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedNode {
    pub spot: SpotId,
    pub node: NodeId,
    pub resolution: NodeResolution,
}

/// Route whose endpoints were given as points of interest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotRoute {
    /// Set when the origin was a point of interest rather than a node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<ResolvedNode>,
    pub destination: ResolvedNode,
    /// Crowd level at the destination when the route was planned
    pub congestion_level: CongestionLevel,
    pub outcome: RouteOutcome,
}

/// Passage a visitor can take from a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableLink {
    pub link: LinkId,
    pub to: NodeId,
    pub to_name: String,
    pub cost: Cost,
    pub distance: Cost,
    pub directed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceComparison {
    pub from: NodeId,
    pub to: NodeId,
    pub straight_line: f64,
    /// First link in table order walkable from `from` to `to`
    pub link: Option<LinkId>,
    pub link_distance: Option<Cost>,
    /// `link_distance - straight_line`
    pub difference: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub links: usize,
    /// Directed passages, two per undirected link
    pub passages: usize,
    /// Points of interest reachable through some node
    pub spots_on_nodes: usize,
}

/// Plans routes over one venue snapshot.
///
/// Holds no state besides the borrowed snapshot and the configuration; every
/// call builds its own graph, so a planner can be shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    snapshot: &'a VenueSnapshot,
    config: RoutingConfig,
}

impl<'a> RoutePlanner<'a> {
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if `config` does not validate.
    pub fn new(snapshot: &'a VenueSnapshot, config: RoutingConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { snapshot, config })
    }

    pub fn snapshot(&self) -> &'a VenueSnapshot {
        self.snapshot
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Plans a route between two map nodes.
    ///
    /// An unreachable target is reported as [`RouteOutcome::NoPath`].
    ///
    /// # Errors
    ///
    /// [`Error::SameEndpoints`] or [`Error::UnknownNode`] before any graph
    /// work, data integrity errors while building the graph.
    pub fn plan_route(
        &self,
        source: NodeId,
        target: NodeId,
        mode: WeightMode,
    ) -> Result<RouteOutcome, Error> {
        self.check_endpoints(source, target)?;
        self.plan_checked(source, target, mode)
    }

    /// Plans independent requests in parallel, results in request order
    pub fn plan_routes(
        &self,
        requests: &[(NodeId, NodeId)],
        mode: WeightMode,
    ) -> Vec<Result<RouteOutcome, Error>> {
        requests
            .par_iter()
            .map(|&(source, target)| self.plan_route(source, target, mode))
            .collect()
    }

    /// Plans a route from a node to a point of interest
    pub fn plan_to_spot(
        &self,
        source: NodeId,
        spot: SpotId,
        mode: WeightMode,
    ) -> Result<SpotRoute, Error> {
        if !self.snapshot.contains_node(source) {
            return Err(Error::UnknownNode(source));
        }
        let destination = self.resolve_spot_node(spot)?;
        let outcome = self.plan_route(source, destination.node, mode)?;

        Ok(SpotRoute {
            origin: None,
            destination,
            congestion_level: self.spot_level(spot)?,
            outcome,
        })
    }

    /// Plans a route between two points of interest.
    ///
    /// # Errors
    ///
    /// [`Error::SameSpots`] for identical ids, [`Error::SameEndpoints`] when
    /// both spots resolve to the same node.
    pub fn plan_between_spots(
        &self,
        from: SpotId,
        to: SpotId,
        mode: WeightMode,
    ) -> Result<SpotRoute, Error> {
        if from == to {
            return Err(Error::SameSpots(from));
        }
        let origin = self.resolve_spot_node(from)?;
        let destination = self.resolve_spot_node(to)?;
        let outcome = self.plan_route(origin.node, destination.node, mode)?;

        Ok(SpotRoute {
            origin: Some(origin),
            destination,
            congestion_level: self.spot_level(to)?,
            outcome,
        })
    }

    /// Node a route to `spot` should end at.
    ///
    /// Tries the spot's own node, then a node referring back to the spot,
    /// then the nearest node to the spot's position.
    pub fn resolve_spot_node(&self, spot: SpotId) -> Result<ResolvedNode, Error> {
        let poi = self.snapshot.spot(spot).ok_or(Error::UnknownSpot(spot))?;
        if !poi.is_open {
            warn!("Point of interest {spot} ({}) is closed", poi.name);
        }

        if let Some(node) = poi.node {
            return Ok(ResolvedNode {
                spot,
                node,
                resolution: NodeResolution::Associated,
            });
        }

        if let Some(node) = self.snapshot.nodes().iter().find(|n| n.spot == Some(spot)) {
            return Ok(ResolvedNode {
                spot,
                node: node.id,
                resolution: NodeResolution::NodeBackReference,
            });
        }

        let (node, distance) = self
            .snapshot
            .nearest_node(poi.position)
            .ok_or(Error::NoNodes)?;
        debug!(
            "Point of interest {spot} has no node, using nearest node {} at distance {distance:.2}",
            node.id
        );
        Ok(ResolvedNode {
            spot,
            node: node.id,
            resolution: NodeResolution::Nearest { distance },
        })
    }

    /// Passages leaving `node`, in link table order
    pub fn available_links(&self, node: NodeId) -> Result<Vec<AvailableLink>, Error> {
        if !self.snapshot.contains_node(node) {
            return Err(Error::UnknownNode(node));
        }

        Ok(self
            .snapshot
            .links()
            .iter()
            .filter_map(|link| {
                let to = if link.from == node {
                    link.to
                } else if !link.directed && link.to == node {
                    link.from
                } else {
                    return None;
                };
                Some(AvailableLink {
                    link: link.id,
                    to,
                    to_name: self.snapshot.node_name(to).to_owned(),
                    cost: link.weight,
                    distance: link.distance,
                    directed: link.directed,
                })
            })
            .collect())
    }

    /// Straight-line distance between two nodes next to the direct link length
    pub fn compare_distance(&self, from: NodeId, to: NodeId) -> Result<DistanceComparison, Error> {
        let straight_line = self.snapshot.straight_line_distance(from, to)?;
        let direct = self
            .snapshot
            .links()
            .iter()
            .find(|link| link.connects(from, to));

        Ok(DistanceComparison {
            from,
            to,
            straight_line,
            link: direct.map(|link| link.id),
            link_distance: direct.map(|link| link.distance),
            difference: direct.map(|link| link.distance - straight_line),
        })
    }

    pub fn graph_summary(&self) -> Result<GraphSummary, Error> {
        let graph = RouteGraph::build(self.snapshot)?;
        let hosted: HashSet<SpotId> = self
            .snapshot
            .spots()
            .iter()
            .filter(|spot| spot.node.is_some())
            .map(|spot| spot.id)
            .chain(
                self.snapshot
                    .nodes()
                    .iter()
                    .filter_map(|node| node.spot)
                    .filter(|&id| self.snapshot.spot(id).is_some()),
            )
            .collect();

        Ok(GraphSummary {
            nodes: graph.node_count(),
            links: self.snapshot.links().len(),
            passages: graph.edge_count(),
            spots_on_nodes: hosted.len(),
        })
    }

    fn check_endpoints(&self, source: NodeId, target: NodeId) -> Result<(), Error> {
        if source == target {
            return Err(Error::SameEndpoints(source));
        }
        for node in [source, target] {
            if !self.snapshot.contains_node(node) {
                return Err(Error::UnknownNode(node));
            }
        }
        Ok(())
    }

    fn plan_checked(
        &self,
        source: NodeId,
        target: NodeId,
        mode: WeightMode,
    ) -> Result<RouteOutcome, Error> {
        let graph = RouteGraph::build(self.snapshot)?;
        let baseline = shortest_path(&graph, source, target)?;

        let (path, congestion) = match mode {
            WeightMode::Distance => (baseline, None),
            WeightMode::CongestionAware => {
                let weights =
                    CongestionWeights::from_snapshot(self.snapshot, self.config.congestion_penalty);
                debug!("Congestion weighting adjusts {} nodes", weights.len());
                let adjusted = weights.apply(&graph);
                let path = shortest_path(&adjusted, source, target)?;

                let baseline_cost = baseline.as_ref().map(|p| p.total_cost);
                let congestion_detour = path
                    .as_ref()
                    .zip(baseline_cost)
                    .map(|(p, cost)| p.base_length() - cost);
                (
                    path,
                    Some(CongestionComparison {
                        baseline_cost,
                        congestion_detour,
                    }),
                )
            }
        };

        let Some(path) = path else {
            info!("No path from node {source} to node {target}");
            return Ok(RouteOutcome::NoPath { source, target });
        };

        info!(
            "Planned route {source} -> {target}: {} steps, cost {:.2}",
            path.steps.len(),
            path.total_cost
        );
        Ok(RouteOutcome::Found(Route::assemble(
            path,
            self.snapshot,
            mode,
            self.config.walking_speed,
            congestion,
        )))
    }

    fn spot_level(&self, spot: SpotId) -> Result<CongestionLevel, Error> {
        self.snapshot
            .spot(spot)
            .map(|poi| poi.congestion_level())
            .ok_or(Error::UnknownSpot(spot))
    }
}
