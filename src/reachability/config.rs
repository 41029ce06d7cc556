//! Index configuration.
//!
//! [`IndexConfig`] decides which part of the graph view an index covers (relationship kinds
//! and traversal direction) and how batch queries are executed (worker pool size and default
//! [`BatchMode`]). It is fixed when the index is constructed.

use crate::utils::graph::{Direction, RelationshipType};

/// Execution strategy for the independent checks of a batch query.
///
/// The mode never changes an answer, only how it is computed: both strategies honour early
/// exit and cancellation and return identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BatchMode {
    /// Fan the checks out to the worker pool.
    #[default]
    Parallel,
    /// Run the checks one after another on the calling thread.
    Sequential,
}

impl From<bool> for BatchMode {
    /// Maps a legacy boolean switch: `true` selects [`BatchMode::Sequential`].
    fn from(sequential: bool) -> Self {
        if sequential {
            BatchMode::Sequential
        } else {
            BatchMode::Parallel
        }
    }
}

/// Configuration of a [`ReachabilityIndex`](crate::ReachabilityIndex).
///
/// # Examples
///
/// ```rust
/// use ontoreach::{BatchMode, Direction, IndexConfig};
///
/// let config = IndexConfig::for_relationships(["subClassOf", "partOf"]);
/// assert_eq!(config.relationships.len(), 2);
/// assert_eq!(config.direction, Direction::Outgoing);
///
/// let sequential = IndexConfig::sequential();
/// assert_eq!(sequential.default_mode, BatchMode::Sequential);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Relationship kinds followed by the index; empty means every kind in the graph.
    pub relationships: Vec<RelationshipType>,

    /// Direction in which edges are followed (default: [`Direction::Outgoing`]).
    ///
    /// With [`Direction::Incoming`], `can_reach(a, b)` answers whether `b` reaches `a` in
    /// the raw graph; with [`Direction::Both`] every edge is treated as undirected.
    pub direction: Direction,

    /// Number of threads in the dedicated batch worker pool.
    ///
    /// `None` runs parallel batches on the rayon global pool.
    pub worker_threads: Option<usize>,

    /// Mode used by batch queries that do not name one explicitly.
    pub default_mode: BatchMode,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            relationships: Vec::new(),
            direction: Direction::Outgoing,
            worker_threads: None,
            default_mode: BatchMode::Parallel,
        }
    }
}

impl IndexConfig {
    /// Every relationship kind, followed outgoing; batches run sequentially on the caller.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            default_mode: BatchMode::Sequential,
            ..Self::default()
        }
    }

    /// Restricts the index to the named relationship kinds.
    #[must_use]
    pub fn for_relationships<I, R>(relationships: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RelationshipType>,
    {
        Self {
            relationships: relationships.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the traversal direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Runs parallel batches on a dedicated pool of `threads` workers.
    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }
}
