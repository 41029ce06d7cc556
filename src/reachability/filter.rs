//! Exclusion filter and the filtered graph the build operates on.
//!
//! A [`NodeFilter`] partitions the nodes of a [`GraphView`] into *eligible* and
//! *forbidden*. [`FilteredGraph::build`] then copies the eligible part of the view into a
//! dense, `NodeId`-indexed adjacency structure:
//!
//! - forbidden nodes get no dense id
//! - every edge with a forbidden endpoint (either side) is dropped, so no path can start at,
//!   end at, or route through a forbidden node
//! - only the configured relationship kinds and direction are followed

use std::{
    collections::{HashMap, HashSet},
    fmt,
    hash::Hash,
};

use crate::{
    reachability::IndexConfig,
    utils::graph::{GraphBase, GraphView, NodeId, RelationshipType, Successors},
    Result,
};

/// Build-time predicate deciding which nodes take part in the reachability universe.
///
/// # Examples
///
/// ```rust
/// use ontoreach::{NodeFilter, NodeId};
///
/// let obsolete = NodeId::new(3);
/// let filter = NodeFilter::new(move |node: NodeId| node != obsolete);
/// assert!(filter.accepts(NodeId::new(1)));
/// assert!(!filter.accepts(obsolete));
///
/// assert!(NodeFilter::<NodeId>::all().accepts(obsolete));
/// ```
pub struct NodeFilter<N> {
    predicate: Box<dyn Fn(N) -> bool + Send + Sync>,
}

impl<N> NodeFilter<N> {
    /// Creates a filter from a predicate; nodes for which it returns `false` are excluded.
    pub fn new(predicate: impl Fn(N) -> bool + Send + Sync + 'static) -> Self {
        NodeFilter {
            predicate: Box::new(predicate),
        }
    }

    /// A filter accepting every node.
    #[must_use]
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    /// Returns `true` if `node` is eligible.
    #[must_use]
    pub fn accepts(&self, node: N) -> bool {
        (self.predicate)(node)
    }
}

impl<N> NodeFilter<N>
where
    N: Eq + Hash + Send + Sync + 'static,
{
    /// A filter excluding exactly the given nodes.
    pub fn excluding(nodes: impl IntoIterator<Item = N>) -> Self {
        let excluded: HashSet<N> = nodes.into_iter().collect();
        Self::new(move |node| !excluded.contains(&node))
    }
}

impl<N> Default for NodeFilter<N> {
    fn default() -> Self {
        Self::all()
    }
}

impl<N> fmt::Debug for NodeFilter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeFilter").finish_non_exhaustive()
    }
}

/// The eligible subgraph of a view, re-indexed densely.
///
/// Dense ids are assigned in the order the view enumerates its nodes. The structure
/// implements [`Successors`] so the SCC algorithms can run on it directly.
#[derive(Debug, Clone)]
pub struct FilteredGraph<N> {
    /// Dense id -> view node
    nodes: Vec<N>,
    /// View node -> dense id, eligible nodes only
    lookup: HashMap<N, NodeId>,
    /// Nodes rejected by the filter
    forbidden: HashSet<N>,
    /// Deduplicated successor lists over dense ids
    successors: Vec<Vec<NodeId>>,
    /// Number of distinct eligible edges
    edge_count: usize,
}

impl<N> FilteredGraph<N>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    /// Applies `filter` and the relationship scoping of `config` to `view`.
    ///
    /// # Errors
    ///
    /// - [`Error::Malformed`](crate::Error::Malformed) if the view enumerates a node twice,
    ///   or reports a neighbor it never enumerated
    /// - Any error returned by the view itself
    pub fn build<G>(view: &G, filter: &NodeFilter<N>, config: &IndexConfig) -> Result<Self>
    where
        G: GraphView<Node = N> + ?Sized,
    {
        let hint = view.node_count_hint();
        let mut nodes = Vec::with_capacity(hint);
        let mut lookup = HashMap::with_capacity(hint);
        let mut forbidden = HashSet::new();

        for node in view.nodes()? {
            if lookup.contains_key(&node) || forbidden.contains(&node) {
                return Err(malformed_error!("node {:?} enumerated more than once", node));
            }
            if filter.accepts(node) {
                lookup.insert(node, NodeId::new(nodes.len()));
                nodes.push(node);
            } else {
                forbidden.insert(node);
            }
        }

        let relationships: HashSet<RelationshipType> = if config.relationships.is_empty() {
            view.relationship_types()?.into_iter().collect()
        } else {
            config.relationships.iter().cloned().collect()
        };

        let mut successors = Vec::with_capacity(nodes.len());
        let mut edge_count = 0;
        for &node in &nodes {
            let mut adjacent = Vec::new();
            for neighbor in view.neighbors_any(node, &relationships, config.direction)? {
                if let Some(&id) = lookup.get(&neighbor) {
                    adjacent.push(id);
                } else if !forbidden.contains(&neighbor) {
                    return Err(malformed_error!(
                        "node {:?} is adjacent to {:?} but was never enumerated",
                        neighbor,
                        node
                    ));
                }
            }
            adjacent.sort_unstable();
            adjacent.dedup();
            edge_count += adjacent.len();
            successors.push(adjacent);
        }

        Ok(FilteredGraph {
            nodes,
            lookup,
            forbidden,
            successors,
            edge_count,
        })
    }

    /// Returns the dense id of an eligible node, `None` for forbidden or unknown nodes.
    #[must_use]
    #[inline]
    pub fn dense_id(&self, node: N) -> Option<NodeId> {
        self.lookup.get(&node).copied()
    }

    /// Returns `true` if the filter rejected `node`.
    #[must_use]
    pub fn is_forbidden(&self, node: N) -> bool {
        self.forbidden.contains(&node)
    }
}

impl<N: Copy> FilteredGraph<N> {
    /// Returns the view node behind a dense id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<N> {
        self.nodes.get(id.index()).copied()
    }

    /// Number of eligible nodes.
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of forbidden nodes.
    #[must_use]
    pub fn forbidden_count(&self) -> usize {
        self.forbidden.len()
    }

    /// Number of distinct edges between eligible nodes.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl<N> GraphBase for FilteredGraph<N> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }
}

impl<N> Successors for FilteredGraph<N> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.successors[node.index()].iter().copied()
    }
}
