//! Trait definitions for graph abstractions.
//!
//! Two families of traits live here:
//!
//! - [`GraphBase`] and [`Successors`] describe dense, `NodeId`-indexed graphs and are
//!   what the algorithms in [`algorithms`](crate::utils::graph::algorithms)
//!   are written against.
//! - [`GraphView`] is the boundary to an external graph store. It exposes nodes with an
//!   opaque identity and typed, directed adjacency. The reachability index only ever reads
//!   through it.
//!
//! # Iterator-Based Traversal
//!
//! Adjacency queries return iterators rather than collections, so a view backed by a
//! database cursor or an adjacency list can stream neighbors without intermediate buffers.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use crate::{
    utils::graph::{Direction, NodeId, RelationshipType},
    Result,
};

/// Core properties of a dense graph: node count and node iteration.
pub trait GraphBase {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns an iterator over all node identifiers, in ascending `NodeId` order.
    fn node_ids(&self) -> impl Iterator<Item = NodeId>;
}

/// Forward edge traversal.
pub trait Successors: GraphBase {
    /// Returns an iterator over the successor nodes of the given node.
    ///
    /// For a directed edge `(u, v)`, node `v` is a successor of `u`.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid node in the graph.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

/// Read-only access to an external directed labeled graph.
///
/// This is the collaborator boundary of the reachability index: it enumerates nodes and,
/// for a node, a relationship kind and a direction, the adjacent nodes. Node identity
/// must be stable for the lifetime of the view and usable as a map key.
///
/// Every method is fallible so that a store which cannot be read (or which returns
/// inconsistent data) surfaces a build failure instead of a silently incomplete index.
///
/// # Examples
///
/// ```rust
/// use ontoreach::{Direction, GraphView, LabeledGraph, RelationshipType};
///
/// let mut graph: LabeledGraph<&str> = LabeledGraph::new();
/// let part_of = RelationshipType::new("partOf");
/// let nucleus = graph.add_node("nucleus");
/// let cell = graph.add_node("cell");
/// graph.add_edge(nucleus, cell, part_of.clone())?;
///
/// let up: Vec<_> = graph.neighbors(nucleus, &part_of, Direction::Outgoing)?.collect();
/// assert_eq!(up, vec![cell]);
///
/// let down: Vec<_> = graph.neighbors(cell, &part_of, Direction::Incoming)?.collect();
/// assert_eq!(down, vec![nucleus]);
/// # Ok::<(), ontoreach::Error>(())
/// ```
pub trait GraphView {
    /// Opaque node handle owned by the view.
    type Node: Copy + Eq + Hash + Debug + Send + Sync;

    /// Returns an iterator over every node in the graph.
    fn nodes(&self) -> Result<impl Iterator<Item = Self::Node> + '_>;

    /// Returns the relationship kinds present in the graph.
    fn relationship_types(&self) -> Result<Vec<RelationshipType>>;

    /// Returns the nodes adjacent to `node` through edges of kind `relationship`,
    /// followed in `direction`.
    ///
    /// With [`Direction::Both`] a node connected in both directions may be yielded twice.
    fn neighbors(
        &self,
        node: Self::Node,
        relationship: &RelationshipType,
        direction: Direction,
    ) -> Result<impl Iterator<Item = Self::Node> + '_>;

    /// Returns the nodes adjacent to `node` through an edge of any kind in `relationships`,
    /// followed in `direction`.
    ///
    /// The default issues one [`neighbors`](GraphView::neighbors) call per relationship.
    /// Stores that can filter several labels in one adjacency scan should override it.
    /// A node may be yielded more than once.
    fn neighbors_any(
        &self,
        node: Self::Node,
        relationships: &HashSet<RelationshipType>,
        direction: Direction,
    ) -> Result<impl Iterator<Item = Self::Node> + '_> {
        let mut adjacent = Vec::new();
        for relationship in relationships {
            adjacent.extend(self.neighbors(node, relationship, direction)?);
        }
        Ok(adjacent.into_iter())
    }

    /// Returns a lower bound on the number of nodes, used for pre-allocation.
    fn node_count_hint(&self) -> usize {
        0
    }
}

impl<T: GraphView + ?Sized> GraphView for &T {
    type Node = T::Node;

    fn nodes(&self) -> Result<impl Iterator<Item = Self::Node> + '_> {
        (**self).nodes()
    }

    fn relationship_types(&self) -> Result<Vec<RelationshipType>> {
        (**self).relationship_types()
    }

    fn neighbors(
        &self,
        node: Self::Node,
        relationship: &RelationshipType,
        direction: Direction,
    ) -> Result<impl Iterator<Item = Self::Node> + '_> {
        (**self).neighbors(node, relationship, direction)
    }

    fn neighbors_any(
        &self,
        node: Self::Node,
        relationships: &HashSet<RelationshipType>,
        direction: Direction,
    ) -> Result<impl Iterator<Item = Self::Node> + '_> {
        (**self).neighbors_any(node, relationships, direction)
    }

    fn node_count_hint(&self) -> usize {
        (**self).node_count_hint()
    }
}
