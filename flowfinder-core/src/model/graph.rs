//! Per-request routing graph built from the link table

use hashbrown::HashMap;
use log::debug;
use petgraph::{
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::{Cost, Error, LinkId, MapLink, MapNode, NodeId, VenueSnapshot};

/// One traversable direction of a link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Passage {
    pub link: LinkId,
    /// Cost seen by the shortest-path search
    pub cost: Cost,
    /// Link weight before any congestion adjustment
    pub base_cost: Cost,
    /// Physical length of the link
    pub distance: Cost,
}

/// Adjacency structure keyed by node.
///
/// Every node of the node table is a vertex, linked or not, so isolated
/// nodes yield "no path" instead of a lookup failure. Vertices are arena
/// indices into the petgraph storage; [`RouteGraph::node_index`] maps map ids
/// onto them. Undirected links contribute one passage per direction.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    pub(crate) graph: DiGraph<NodeId, Passage>,
    index: HashMap<NodeId, NodeIndex>,
}

impl RouteGraph {
    /// Builds the graph from the complete snapshot tables
    pub fn build(snapshot: &VenueSnapshot) -> Result<Self, Error> {
        Self::from_records(snapshot.nodes(), snapshot.links())
    }

    /// # Errors
    ///
    /// [`Error::DanglingLink`] when a link endpoint is not in `nodes`,
    /// [`Error::DuplicateNode`] and [`Error::InvalidLinkCost`] for corrupt records.
    pub fn from_records(nodes: &[MapNode], links: &[MapLink]) -> Result<Self, Error> {
        let mut graph = DiGraph::with_capacity(nodes.len(), links.len() * 2);
        let mut index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let idx = graph.add_node(node.id);
            if index.insert(node.id, idx).is_some() {
                return Err(Error::DuplicateNode(node.id));
            }
        }

        for link in links {
            link.validate()?;
            let endpoint = |node: NodeId| {
                index
                    .get(&node)
                    .copied()
                    .ok_or(Error::DanglingLink {
                        link: link.id,
                        node,
                    })
            };
            let from = endpoint(link.from)?;
            let to = endpoint(link.to)?;

            let passage = Passage {
                link: link.id,
                cost: link.weight,
                base_cost: link.weight,
                distance: link.distance,
            };
            graph.add_edge(from, to, passage);
            if !link.directed {
                graph.add_edge(to, from, passage);
            }
        }

        debug!(
            "Built route graph: {} nodes, {} links, {} passages",
            graph.node_count(),
            links.len(),
            graph.edge_count()
        );

        Ok(Self { graph, index })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed passages
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn require_node(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.node_index(id).ok_or(Error::UnknownNode(id))
    }

    /// Map id stored at a vertex
    pub fn node_id(&self, idx: NodeIndex) -> NodeId {
        self.graph[idx]
    }

    pub fn passage(&self, edge: EdgeIndex) -> &Passage {
        &self.graph[edge]
    }

    /// Outgoing passages of a vertex as `(edge, target, passage)`, in link
    /// table order.
    ///
    /// petgraph lists the most recently added edge first, so the adjacency
    /// list is walked backwards.
    pub fn passages(
        &self,
        idx: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &Passage)> + '_ {
        let mut edges: Vec<_> = self
            .graph
            .edges(idx)
            .map(|edge| (edge.id(), edge.target(), edge.weight()))
            .collect();
        edges.reverse();
        edges.into_iter()
    }

    /// Outgoing passages of a map node as `(neighbour id, passage)`
    pub fn outgoing(&self, id: NodeId) -> Result<Vec<(NodeId, Passage)>, Error> {
        let idx = self.require_node(id)?;
        Ok(self
            .passages(idx)
            .map(|(_, target, passage)| (self.graph[target], *passage))
            .collect())
    }

    /// Copy of the graph with identical topology and recomputed costs.
    ///
    /// `cost` receives the destination node id and the passage.
    pub fn map_costs<F>(&self, mut cost: F) -> Self
    where
        F: FnMut(NodeId, &Passage) -> Cost,
    {
        let graph = self.graph.map(
            |_, &id| id,
            |edge, passage| match self.graph.edge_endpoints(edge) {
                Some((_, to)) => Passage {
                    cost: cost(self.graph[to], passage),
                    ..*passage
                },
                None => *passage,
            },
        );

        Self {
            graph,
            index: self.index.clone(),
        }
    }
}
