//! Core directed graph implementation.
//!
//! [`DirectedGraph`] stores node data, edge data and per-node adjacency lists in both
//! directions. It is the storage behind [`LabeledGraph`](crate::utils::graph::LabeledGraph)
//! and the input shape the SCC and topological algorithms are tested against.

use crate::{
    utils::graph::{
        ids::{EdgeId, NodeId},
        traits::{GraphBase, Successors},
    },
    Error, Result,
};

/// Internal storage for edge data and endpoints.
#[derive(Debug, Clone)]
struct EdgeData<E> {
    /// Source node of the edge
    source: NodeId,
    /// Target node of the edge
    target: NodeId,
    /// User-provided edge data
    data: E,
}

/// A directed multigraph with typed node and edge data.
///
/// # Memory Layout
///
/// - Nodes are stored in a contiguous vector indexed by `NodeId`
/// - Edges are stored in a contiguous vector indexed by `EdgeId`
/// - Adjacency lists (outgoing/incoming) store `EdgeId` references
///
/// # Thread Safety
///
/// `DirectedGraph<N, E>` is [`Send`] and [`Sync`] when both `N` and `E` are. Build it
/// single-threaded, then share it immutably.
///
/// # Examples
///
/// ```rust
/// use ontoreach::utils::graph::DirectedGraph;
///
/// let mut graph: DirectedGraph<&str, u32> = DirectedGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// graph.add_edge(a, b, 10)?;
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.successors(a).collect::<Vec<_>>(), vec![b]);
/// assert_eq!(graph.incoming(b).collect::<Vec<_>>(), vec![(a, &10)]);
/// # Ok::<(), ontoreach::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectedGraph<N, E> {
    /// Node data storage
    nodes: Vec<N>,
    /// Edge data storage
    edges: Vec<EdgeData<E>>,
    /// Outgoing edges per node
    outgoing: Vec<Vec<EdgeId>>,
    /// Incoming edges per node
    incoming: Vec<Vec<EdgeId>>,
}

impl<N, E> Default for DirectedGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> DirectedGraph<N, E> {
    /// Creates a new empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        DirectedGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Creates a new directed graph with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        DirectedGraph {
            nodes: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
            outgoing: Vec::with_capacity(node_capacity),
            incoming: Vec::with_capacity(node_capacity),
        }
    }

    /// Adds a new node and returns its sequentially assigned `NodeId`.
    pub fn add_node(&mut self, data: N) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(data);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Adds a directed edge from `source` to `target`.
    ///
    /// Parallel edges and self-loops are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if either endpoint does not exist in the graph.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, data: E) -> Result<EdgeId> {
        if !self.contains_node(source) {
            return Err(Error::GraphError(format!(
                "source node {} does not exist in graph with {} nodes",
                source,
                self.nodes.len()
            )));
        }
        if !self.contains_node(target) {
            return Err(Error::GraphError(format!(
                "target node {} does not exist in graph with {} nodes",
                target,
                self.nodes.len()
            )));
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(EdgeData {
            source,
            target,
            data,
        });
        self.outgoing[source.index()].push(id);
        self.incoming[target.index()].push(id);

        Ok(id)
    }

    /// Returns the data associated with the given node.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&N> {
        self.nodes.get(node.index())
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `node` is a valid node of this graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Returns an iterator over all node identifiers, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Returns an iterator over all edge data, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.iter().map(|e| &e.data)
    }

    /// Returns an iterator over the successors of the given node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing(node).map(|(target, _)| target)
    }

    /// Returns an iterator over `(target, &data)` for every outgoing edge of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.outgoing[node.index()].iter().map(|&edge_id| {
            let edge = &self.edges[edge_id.index()];
            (edge.target, &edge.data)
        })
    }

    /// Returns an iterator over `(source, &data)` for every incoming edge of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.incoming[node.index()].iter().map(|&edge_id| {
            let edge = &self.edges[edge_id.index()];
            (edge.source, &edge.data)
        })
    }
}

impl<N, E> GraphBase for DirectedGraph<N, E> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }
}

impl<N, E> Successors for DirectedGraph<N, E> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        DirectedGraph::successors(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph: DirectedGraph<(), ()> = DirectedGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_nodes_and_edges() {
        let mut graph: DirectedGraph<char, &str> = DirectedGraph::with_capacity(3, 2);
        let a = graph.add_node('A');
        let b = graph.add_node('B');
        let c = graph.add_node('C');

        let ab = graph.add_edge(a, b, "ab").unwrap();
        graph.add_edge(a, c, "ac").unwrap();

        assert_eq!(graph.node(b), Some(&'B'));
        assert_eq!(ab, EdgeId::new(0));
        assert_eq!(graph.successors(a).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(
            graph.outgoing(a).map(|(_, d)| *d).collect::<Vec<_>>(),
            vec!["ab", "ac"]
        );
        assert_eq!(graph.incoming(b).collect::<Vec<_>>(), vec![(a, &"ab")]);
    }

    #[test]
    fn test_add_edge_invalid_endpoint() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let a = graph.add_node(());

        let err = graph.add_edge(a, NodeId::new(5), ()).unwrap_err();
        assert!(err.to_string().contains("target node n5"));

        let err = graph.add_edge(NodeId::new(9), a, ()).unwrap_err();
        assert!(err.to_string().contains("source node n9"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_and_parallel_edges() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, a, ()).unwrap();
        graph.add_edge(a, b, ()).unwrap();
        graph.add_edge(a, b, ()).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.successors(a).collect::<Vec<_>>(), vec![a, b, b]);
        assert_eq!(graph.incoming(a).map(|(s, _)| s).collect::<Vec<_>>(), vec![a]);
    }
}
