//! Directed labeled property graph.
//!
//! [`LabeledGraph`] is the in-process graph store: nodes carry arbitrary property data
//! `N`, edges carry a [`RelationshipType`] label (`subClassOf`, `partOf`, ...). It
//! implements [`GraphView`] with [`NodeId`] as the node handle, so it can be indexed
//! directly by a [`ReachabilityIndex`](crate::ReachabilityIndex).

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    sync::Arc,
};

use crate::{
    utils::graph::{DirectedGraph, EdgeId, GraphView, NodeId},
    Error, Result,
};

/// Name of a relationship kind, such as `subClassOf`.
///
/// Cheap to clone; equality and hashing compare the name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipType(Arc<str>);

impl RelationshipType {
    /// Creates a relationship type with the given name.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        RelationshipType(Arc::from(name.as_ref()))
    }

    /// Returns the relationship name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelationshipType({})", self.0)
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelationshipType {
    fn from(name: &str) -> Self {
        RelationshipType::new(name)
    }
}

/// Direction in which edges are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// From source to target.
    #[default]
    Outgoing,
    /// From target to source.
    Incoming,
    /// Both ways; every edge is treated as symmetric.
    Both,
}

impl Direction {
    /// Returns `true` if outgoing edges are followed.
    #[must_use]
    pub const fn follows_outgoing(self) -> bool {
        matches!(self, Direction::Outgoing | Direction::Both)
    }

    /// Returns `true` if incoming edges are followed.
    #[must_use]
    pub const fn follows_incoming(self) -> bool {
        matches!(self, Direction::Incoming | Direction::Both)
    }
}

/// A directed multigraph with property data on nodes and relationship labels on edges.
///
/// # Examples
///
/// ```rust
/// use ontoreach::{LabeledGraph, RelationshipType};
///
/// let mut graph: LabeledGraph<String> = LabeledGraph::new();
/// let neuron = graph.add_node("neuron".to_string());
/// let cell = graph.add_node("cell".to_string());
/// graph.add_edge(neuron, cell, RelationshipType::new("subClassOf"))?;
///
/// assert_eq!(graph.node(cell).map(String::as_str), Some("cell"));
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), ontoreach::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LabeledGraph<N> {
    graph: DirectedGraph<N, RelationshipType>,
}

impl<N> Default for LabeledGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> LabeledGraph<N> {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        LabeledGraph {
            graph: DirectedGraph::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        LabeledGraph {
            graph: DirectedGraph::with_capacity(node_capacity, edge_capacity),
        }
    }

    /// Adds a node carrying `data`.
    pub fn add_node(&mut self, data: N) -> NodeId {
        self.graph.add_node(data)
    }

    /// Adds a labeled edge from `source` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if either endpoint does not exist.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        relationship: impl Into<RelationshipType>,
    ) -> Result<EdgeId> {
        self.graph.add_edge(source, target, relationship.into())
    }

    /// Returns the property data of a node.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&N> {
        self.graph.node(node)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Every edge touching `node` in `direction`, as `(other endpoint, label)`.
    fn adjacent(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> Result<impl Iterator<Item = (NodeId, &RelationshipType)> + '_> {
        if !self.graph.contains_node(node) {
            return Err(Error::GraphError(format!(
                "node {} does not exist in graph with {} nodes",
                node,
                self.graph.node_count()
            )));
        }

        let outgoing = direction
            .follows_outgoing()
            .then(|| self.graph.outgoing(node))
            .into_iter()
            .flatten();
        let incoming = direction
            .follows_incoming()
            .then(|| self.graph.incoming(node))
            .into_iter()
            .flatten();
        Ok(outgoing.chain(incoming))
    }
}

impl<N> GraphView for LabeledGraph<N> {
    type Node = NodeId;

    fn nodes(&self) -> Result<impl Iterator<Item = NodeId> + '_> {
        Ok(self.graph.node_ids())
    }

    fn relationship_types(&self) -> Result<Vec<RelationshipType>> {
        Ok(self
            .graph
            .edges()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect())
    }

    fn neighbors(
        &self,
        node: NodeId,
        relationship: &RelationshipType,
        direction: Direction,
    ) -> Result<impl Iterator<Item = NodeId> + '_> {
        let wanted = relationship.clone();
        Ok(self
            .adjacent(node, direction)?
            .filter(move |(_, label)| **label == wanted)
            .map(|(other, _)| other))
    }

    fn neighbors_any(
        &self,
        node: NodeId,
        relationships: &HashSet<RelationshipType>,
        direction: Direction,
    ) -> Result<impl Iterator<Item = NodeId> + '_> {
        let matched: Vec<NodeId> = self
            .adjacent(node, direction)?
            .filter(|(_, label)| relationships.contains(*label))
            .map(|(other, _)| other)
            .collect();
        Ok(matched.into_iter())
    }

    fn node_count_hint(&self) -> usize {
        self.graph.node_count()
    }
}
