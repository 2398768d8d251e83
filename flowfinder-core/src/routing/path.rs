//! Turning a shortest-path tree into an ordered list of steps

use log::warn;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use super::dijkstra::{ShortestPathTree, shortest_path_tree};
use crate::{Cost, Error, LinkId, NodeId, RouteGraph};

/// Traversal of one link
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathStep {
    pub from: NodeId,
    pub to: NodeId,
    pub link: LinkId,
    /// Cost paid by the search for this step
    pub segment_cost: Cost,
    /// Unadjusted link weight
    pub base_cost: Cost,
    /// Physical length of the link
    pub distance: Cost,
}

/// Minimum-cost path between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub source: NodeId,
    pub target: NodeId,
    pub total_cost: Cost,
    /// Source to target; `steps[i].to == steps[i + 1].from`
    pub steps: Vec<PathStep>,
}

impl ShortestPath {
    /// Visited nodes, source and target included
    pub fn node_ids(&self) -> Vec<NodeId> {
        std::iter::once(self.source)
            .chain(self.steps.iter().map(|step| step.to))
            .collect()
    }

    /// Cost of the path in unadjusted link weights
    pub fn base_length(&self) -> Cost {
        self.steps.iter().map(|step| step.base_cost).sum()
    }

    /// Physical length of the path
    pub fn walking_distance(&self) -> Cost {
        self.steps.iter().map(|step| step.distance).sum()
    }
}

/// Walks predecessor links back from `target` to the tree source.
///
/// Returns `Ok(None)` when the target was never reached. Segment costs are
/// summed in path order, the same order the search accumulated them in, so
/// they add up to `total_cost` exactly.
///
/// # Errors
///
/// [`Error::BrokenPredecessorChain`] if the chain loops.
pub fn reconstruct_path(
    graph: &RouteGraph,
    tree: &ShortestPathTree,
    target: NodeIndex,
) -> Result<Option<ShortestPath>, Error> {
    let Some(total_cost) = tree.distance(target) else {
        return Ok(None);
    };

    let source = tree.source();
    let mut steps = Vec::new();
    let mut current = target;

    while current != source {
        let Some(predecessor) = tree.predecessor(current) else {
            warn!(
                "Node {} has a distance but no predecessor, reporting no path",
                graph.node_id(current)
            );
            return Ok(None);
        };
        if steps.len() >= graph.node_count() {
            return Err(Error::BrokenPredecessorChain(graph.node_id(target)));
        }

        let passage = graph.passage(predecessor.edge);
        steps.push(PathStep {
            from: graph.node_id(predecessor.node),
            to: graph.node_id(current),
            link: passage.link,
            segment_cost: passage.cost,
            base_cost: passage.base_cost,
            distance: passage.distance,
        });
        current = predecessor.node;
    }
    steps.reverse();

    Ok(Some(ShortestPath {
        source: graph.node_id(source),
        target: graph.node_id(target),
        total_cost,
        steps,
    }))
}

/// Shortest path between two map nodes, `Ok(None)` when none exists
pub fn shortest_path(
    graph: &RouteGraph,
    source: NodeId,
    target: NodeId,
) -> Result<Option<ShortestPath>, Error> {
    let source = graph.require_node(source)?;
    let target = graph.require_node(target)?;
    let tree = shortest_path_tree(graph, source, Some(target))?;
    reconstruct_path(graph, &tree, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapLink, MapNode};

    fn nodes(count: u32) -> Vec<MapNode> {
        (1..=count)
            .map(|id| MapNode::new(id, format!("n{id}"), 0.0, 0.0))
            .collect()
    }

    #[test]
    fn steps_are_ordered_source_to_target() {
        let links = [
            MapLink::new(1, 1, 2, 1.0),
            MapLink::new(2, 2, 3, 2.0),
            MapLink::new(3, 3, 4, 3.0),
        ];
        let graph = RouteGraph::from_records(&nodes(4), &links).unwrap();
        let path = shortest_path(&graph, 1, 4).unwrap().unwrap();

        assert_eq!(path.node_ids(), vec![1, 2, 3, 4]);
        assert_eq!(
            path.steps.iter().map(|s| s.link).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(path.total_cost, 6.0);
    }

    #[test]
    fn walks_undirected_link_backwards() {
        let links = [MapLink::new(1, 1, 2, 1.5), MapLink::new(2, 2, 3, 2.5)];
        let graph = RouteGraph::from_records(&nodes(3), &links).unwrap();
        let path = shortest_path(&graph, 3, 1).unwrap().unwrap();

        assert_eq!(path.node_ids(), vec![3, 2, 1]);
        assert_eq!(path.steps[0].from, 3);
        assert_eq!(path.steps[0].to, 2);
        assert_eq!(path.total_cost, 4.0);
    }

    #[test]
    fn equal_cost_parallel_links_keep_the_first() {
        let links = [MapLink::new(1, 1, 2, 5.0), MapLink::new(2, 1, 2, 5.0)];
        let graph = RouteGraph::from_records(&nodes(2), &links).unwrap();

        let there = shortest_path(&graph, 1, 2).unwrap().unwrap();
        assert_eq!(there.steps[0].link, 1);
        let back = shortest_path(&graph, 2, 1).unwrap().unwrap();
        assert_eq!(back.steps[0].link, 1);
    }

    #[test]
    fn source_equals_target_is_empty_path() {
        let graph = RouteGraph::from_records(&nodes(2), &[]).unwrap();
        let path = shortest_path(&graph, 2, 2).unwrap().unwrap();
        assert!(path.steps.is_empty());
        assert_eq!(path.total_cost, 0.0);
    }

    #[test]
    fn disconnected_target_is_none() {
        let graph =
            RouteGraph::from_records(&nodes(3), &[MapLink::new(1, 1, 2, 1.0)]).unwrap();
        assert_eq!(shortest_path(&graph, 1, 3).unwrap(), None);
    }

    #[test]
    fn unknown_endpoint_is_an_error() {
        let graph = RouteGraph::from_records(&nodes(2), &[]).unwrap();
        assert!(matches!(
            shortest_path(&graph, 1, 42),
            Err(Error::UnknownNode(42))
        ));
    }
}
