use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::trace;
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::state::State;
use crate::{Cost, Error, RouteGraph};

/// Back-pointer to the vertex and passage a node was reached through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    pub node: NodeIndex,
    pub edge: EdgeIndex,
}

/// Distances and predecessors computed from one source
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeIndex,
    distances: Vec<Cost>,
    predecessors: Vec<Option<Predecessor>>,
    settled: FixedBitSet,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Best known distance, `None` while the node is unreached
    pub fn distance(&self, node: NodeIndex) -> Option<Cost> {
        self.distances
            .get(node.index())
            .copied()
            .filter(|distance| distance.is_finite())
    }

    pub fn predecessor(&self, node: NodeIndex) -> Option<Predecessor> {
        self.predecessors.get(node.index()).copied().flatten()
    }

    /// Whether the distance of `node` is final
    pub fn is_settled(&self, node: NodeIndex) -> bool {
        self.settled.contains(node.index())
    }

    /// All settled vertices with their distances
    pub fn settled(&self) -> impl Iterator<Item = (NodeIndex, Cost)> + '_ {
        self.settled
            .ones()
            .map(|idx| (NodeIndex::new(idx), self.distances[idx]))
    }
}

/// Dijkstra's algorithm with a binary heap and lazy deletion.
///
/// Improved nodes are pushed again instead of decreasing their key; stale
/// entries are skipped once the node is settled. With `target` set the search
/// stops as soon as the target is settled, which leaves its distance and
/// predecessor chain exactly as a full run would.
///
/// # Errors
///
/// [`Error::InvalidNodeIndex`] for a source outside the graph and
/// [`Error::InvalidEdgeCost`] when a negative or NaN passage cost is met.
pub fn shortest_path_tree(
    graph: &RouteGraph,
    source: NodeIndex,
    target: Option<NodeIndex>,
) -> Result<ShortestPathTree, Error> {
    let node_count = graph.node_count();
    if source.index() >= node_count {
        return Err(Error::InvalidNodeIndex);
    }

    let mut distances = vec![Cost::INFINITY; node_count];
    let mut predecessors: Vec<Option<Predecessor>> = vec![None; node_count];
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::with_capacity(node_count.min(1024));

    distances[source.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { node, .. }) = heap.pop() {
        if settled.contains(node.index()) {
            continue;
        }
        settled.insert(node.index());

        if target == Some(node) {
            break;
        }

        let cost = distances[node.index()];
        for (edge, next, passage) in graph.passages(node) {
            if passage.cost.is_nan() || passage.cost < 0.0 {
                return Err(Error::InvalidEdgeCost {
                    link: passage.link,
                    cost: passage.cost,
                });
            }
            if settled.contains(next.index()) {
                continue;
            }

            let next_cost = cost + passage.cost;
            if next_cost < distances[next.index()] {
                trace!(
                    "Relaxed {} -> {} via link {} to {next_cost}",
                    graph.node_id(node),
                    graph.node_id(next),
                    passage.link
                );
                distances[next.index()] = next_cost;
                predecessors[next.index()] = Some(Predecessor { node, edge });
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    Ok(ShortestPathTree {
        source,
        distances,
        predecessors,
        settled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapLink, MapNode};

    fn graph(links: &[MapLink]) -> RouteGraph {
        let nodes: Vec<MapNode> = (1..=5)
            .map(|id| MapNode::new(id, format!("n{id}"), 0.0, 0.0))
            .collect();
        RouteGraph::from_records(&nodes, links).unwrap()
    }

    #[test]
    fn prefers_cheaper_detour() {
        let g = graph(&[
            MapLink::new(1, 1, 2, 10.0),
            MapLink::new(2, 1, 3, 2.0),
            MapLink::new(3, 3, 2, 3.0),
        ]);
        let source = g.node_index(1).unwrap();
        let tree = shortest_path_tree(&g, source, None).unwrap();

        let two = g.node_index(2).unwrap();
        assert_eq!(tree.distance(two), Some(5.0));
        let pred = tree.predecessor(two).unwrap();
        assert_eq!(g.node_id(pred.node), 3);
        assert_eq!(g.passage(pred.edge).link, 3);
    }

    #[test]
    fn unreachable_nodes_have_no_distance() {
        let g = graph(&[MapLink::new(1, 1, 2, 1.0)]);
        let tree = shortest_path_tree(&g, g.node_index(1).unwrap(), None).unwrap();
        let five = g.node_index(5).unwrap();
        assert_eq!(tree.distance(five), None);
        assert!(tree.predecessor(five).is_none());
        assert!(!tree.is_settled(five));
    }

    #[test]
    fn early_exit_matches_full_run() {
        let g = graph(&[
            MapLink::new(1, 1, 2, 1.0),
            MapLink::new(2, 2, 3, 1.0),
            MapLink::new(3, 1, 3, 5.0),
            MapLink::new(4, 3, 4, 1.0),
            MapLink::new(5, 4, 5, 1.0),
        ]);
        let source = g.node_index(1).unwrap();
        let target = g.node_index(3).unwrap();
        let full = shortest_path_tree(&g, source, None).unwrap();
        let early = shortest_path_tree(&g, source, Some(target)).unwrap();

        assert_eq!(full.distance(target), early.distance(target));
        assert_eq!(full.predecessor(target), early.predecessor(target));
        assert!(early.is_settled(target));
        assert!(!early.is_settled(g.node_index(5).unwrap()));
    }

    #[test]
    fn source_is_settled_at_zero() {
        let g = graph(&[]);
        let source = g.node_index(3).unwrap();
        let tree = shortest_path_tree(&g, source, None).unwrap();
        assert_eq!(tree.distance(source), Some(0.0));
        assert_eq!(tree.settled().count(), 1);
    }

    #[test]
    fn rejects_negative_cost() {
        let g = graph(&[MapLink::new(9, 1, 2, 1.0)]).map_costs(|_, _| -1.0);
        let err = shortest_path_tree(&g, g.node_index(1).unwrap(), None).unwrap_err();
        assert!(matches!(err, Error::InvalidEdgeCost { link: 9, .. }));
    }

    #[test]
    fn rejects_out_of_range_source() {
        let g = graph(&[]);
        assert!(matches!(
            shortest_path_tree(&g, NodeIndex::new(100), None),
            Err(Error::InvalidNodeIndex)
        ));
    }
}
