//! The reachability index façade.
//!
//! [`ReachabilityIndex`] binds a [`GraphView`] and an [`IndexConfig`], builds the
//! filtered graph, condensation and closure table once in [`create_index`], and answers
//! point and batch queries from the immutable result afterwards.
//!
//! [`create_index`]: ReachabilityIndex::create_index

use std::{collections::HashSet, fmt, hash::Hash, time::Duration, time::Instant};

use rayon::ThreadPool;
use tracing::{debug, info};

use crate::{
    reachability::{
        batch::{self, BatchCoordinator},
        closure::ClosureTable,
        condensation::{ComponentId, Condensation},
        filter::{FilteredGraph, NodeFilter},
        BatchMode, IndexConfig,
    },
    utils::{graph::GraphView, synchronization::CancellationToken},
    Error, Result,
};

/// Lifecycle state of a [`ReachabilityIndex`].
///
/// The only transition is `Uninitialized -> Built`, performed once by a successful
/// [`create_index`](ReachabilityIndex::create_index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexState {
    /// No closure table exists; every query fails with [`Error::NotBuilt`].
    Uninitialized,
    /// The closure table is built and immutable.
    Built,
}

/// Summary of a completed index build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    /// Nodes accepted by the exclusion filter
    pub eligible_nodes: usize,
    /// Nodes rejected by the exclusion filter
    pub forbidden_nodes: usize,
    /// Distinct edges between eligible nodes
    pub edges: usize,
    /// Strongly connected components
    pub components: usize,
    /// Size of the largest component
    pub largest_component: usize,
    /// Distinct edges between components
    pub condensation_edges: usize,
    /// Reachable component pairs, reflexive pairs included
    pub closure_entries: usize,
    /// Heap bytes held by the closure table
    pub closure_bytes: usize,
    /// Wall-clock time spent in `create_index`
    pub build_time: Duration,
}

/// Everything computed by a successful build.
struct Snapshot<N> {
    filtered: FilteredGraph<N>,
    condensation: Condensation,
    closure: ClosureTable,
    stats: IndexStats,
    pool: Option<ThreadPool>,
}

impl<N> Snapshot<N>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    #[inline]
    fn component(&self, node: N) -> Option<ComponentId> {
        self.filtered
            .dense_id(node)
            .and_then(|id| self.condensation.component_of(id))
    }

    fn can_reach(&self, source: N, destination: N) -> bool {
        if source == destination {
            return true;
        }
        match (self.component(source), self.component(destination)) {
            (Some(from), Some(to)) => self.closure.reaches(from, to),
            _ => false,
        }
    }

    fn expand(&self, components: impl Iterator<Item = ComponentId>) -> Vec<N> {
        components
            .flat_map(|component| self.condensation.members(component))
            .filter_map(|&id| self.filtered.node(id))
            .collect()
    }

    fn coordinator(&self) -> BatchCoordinator<'_> {
        BatchCoordinator::new(self.pool.as_ref())
    }
}

/// Precomputed reachability over a directed labeled graph.
///
/// # Examples
///
/// ```rust
/// use ontoreach::{BatchMode, LabeledGraph, NodeFilter, ReachabilityIndex};
///
/// let mut graph = LabeledGraph::new();
/// let thing = graph.add_node("Thing");
/// let animal = graph.add_node("Animal");
/// let dog = graph.add_node("Dog");
/// let obsolete = graph.add_node("ObsoleteMammal");
/// graph.add_edge(dog, obsolete, "subClassOf")?;
/// graph.add_edge(obsolete, animal, "subClassOf")?;
/// graph.add_edge(animal, thing, "subClassOf")?;
///
/// let mut index = ReachabilityIndex::new(&graph);
/// index.create_index(Some(NodeFilter::excluding([obsolete])))?;
///
/// assert!(index.can_reach(animal, thing)?);
/// // The only path runs through an excluded node
/// assert!(!index.can_reach(dog, thing)?);
/// assert!(index.all_reaching([animal, thing], thing)?);
/// # Ok::<(), ontoreach::Error>(())
/// ```
pub struct ReachabilityIndex<G: GraphView> {
    graph: G,
    config: IndexConfig,
    snapshot: Option<Snapshot<G::Node>>,
}

impl<G: GraphView> ReachabilityIndex<G> {
    /// Binds an index to `graph` with the default configuration. Nothing is computed yet.
    pub fn new(graph: G) -> Self {
        Self::with_config(graph, IndexConfig::default())
    }

    /// Binds an index to `graph` with an explicit configuration.
    pub fn with_config(graph: G, config: IndexConfig) -> Self {
        ReachabilityIndex {
            graph,
            config,
            snapshot: None,
        }
    }

    /// Builds the closure table, moving the index from `Uninitialized` to `Built`.
    ///
    /// `filter` excludes nodes from the reachability universe; `None` keeps every node.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyBuilt`] if the index has been built before
    /// - [`Error::Malformed`] or any view error if the graph cannot be read consistently
    /// - [`Error::WorkerPool`] if the dedicated worker pool cannot be started
    ///
    /// On error the index stays `Uninitialized`.
    pub fn create_index(&mut self, filter: Option<NodeFilter<G::Node>>) -> Result<IndexStats> {
        if self.snapshot.is_some() {
            return Err(Error::AlreadyBuilt);
        }

        let started = Instant::now();
        let filter = filter.unwrap_or_default();

        let filtered = FilteredGraph::build(&self.graph, &filter, &self.config)?;
        debug!(
            eligible = filtered.eligible_count(),
            forbidden = filtered.forbidden_count(),
            edges = filtered.edge_count(),
            "filtered graph collected"
        );

        let condensation = Condensation::build(&filtered);
        debug!(
            components = condensation.component_count(),
            condensation_edges = condensation.edge_count(),
            "components condensed"
        );

        let closure = ClosureTable::build(&condensation);

        let pool = self.config.worker_threads.map(batch::build_pool).transpose()?;

        let stats = IndexStats {
            eligible_nodes: filtered.eligible_count(),
            forbidden_nodes: filtered.forbidden_count(),
            edges: filtered.edge_count(),
            components: condensation.component_count(),
            largest_component: condensation.largest_component(),
            condensation_edges: condensation.edge_count(),
            closure_entries: closure.entry_count(),
            closure_bytes: closure.heap_bytes(),
            build_time: started.elapsed(),
        };
        info!(
            eligible = stats.eligible_nodes,
            forbidden = stats.forbidden_nodes,
            components = stats.components,
            closure_entries = stats.closure_entries,
            closure_bytes = stats.closure_bytes,
            elapsed_ms = stats.build_time.as_millis() as u64,
            "reachability index built"
        );

        self.snapshot = Some(Snapshot {
            filtered,
            condensation,
            closure,
            stats: stats.clone(),
            pool,
        });
        Ok(stats)
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> IndexState {
        if self.snapshot.is_some() {
            IndexState::Built
        } else {
            IndexState::Uninitialized
        }
    }

    /// Returns `true` once [`create_index`](Self::create_index) has succeeded.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Returns the statistics of the completed build.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before the index is built.
    pub fn stats(&self) -> Result<&IndexStats> {
        self.snapshot().map(|snapshot| &snapshot.stats)
    }

    /// The configuration the index was created with.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The graph view the index is bound to.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    fn snapshot(&self) -> Result<&Snapshot<G::Node>> {
        self.snapshot.as_ref().ok_or(Error::NotBuilt)
    }

    /// Returns `true` if `destination` is reachable from `source`.
    ///
    /// Every node reaches itself. Excluded nodes, and nodes the view never enumerated,
    /// reach nothing else and are reached by nothing else.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before the index is built.
    pub fn can_reach(&self, source: G::Node, destination: G::Node) -> Result<bool> {
        Ok(self.snapshot()?.can_reach(source, destination))
    }

    /// Returns `true` iff `source` reaches every node in `destinations`.
    ///
    /// `mode` picks the execution strategy and never changes the answer. An empty
    /// destination set yields `true`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotBuilt`] before the index is built
    /// - [`Error::Cancelled`] if `cancel` fires before the answer is known
    pub fn all_reachable_from(
        &self,
        source: G::Node,
        destinations: impl IntoIterator<Item = G::Node>,
        mode: BatchMode,
        cancel: Option<&CancellationToken>,
    ) -> Result<bool> {
        let snapshot = self.snapshot()?;
        let destinations: Vec<G::Node> = destinations.into_iter().collect();
        snapshot
            .coordinator()
            .all(&destinations, mode, cancel, |&destination| {
                snapshot.can_reach(source, destination)
            })
    }

    /// Returns `true` iff every node in `sources` reaches `destination`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotBuilt`] before the index is built
    /// - [`Error::Cancelled`] if `cancel` fires before the answer is known
    pub fn all_reaching_to(
        &self,
        sources: impl IntoIterator<Item = G::Node>,
        destination: G::Node,
        mode: BatchMode,
        cancel: Option<&CancellationToken>,
    ) -> Result<bool> {
        let snapshot = self.snapshot()?;
        let sources: Vec<G::Node> = sources.into_iter().collect();
        snapshot
            .coordinator()
            .all(&sources, mode, cancel, |&source| {
                snapshot.can_reach(source, destination)
            })
    }

    /// [`all_reachable_from`](Self::all_reachable_from) in the configured default mode,
    /// without cancellation.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before the index is built.
    pub fn all_reachable(
        &self,
        source: G::Node,
        destinations: impl IntoIterator<Item = G::Node>,
    ) -> Result<bool> {
        self.all_reachable_from(source, destinations, self.config.default_mode, None)
    }

    /// [`all_reaching_to`](Self::all_reaching_to) in the configured default mode, without
    /// cancellation.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before the index is built.
    pub fn all_reaching(
        &self,
        sources: impl IntoIterator<Item = G::Node>,
        destination: G::Node,
    ) -> Result<bool> {
        self.all_reaching_to(sources, destination, self.config.default_mode, None)
    }

    /// Returns every `(source, destination)` pair of the cross product where `source`
    /// reaches `destination`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotBuilt`] before the index is built
    /// - [`Error::Cancelled`] if `cancel` fires before every pair was checked
    pub fn get_connect_pairs(
        &self,
        sources: impl IntoIterator<Item = G::Node>,
        destinations: impl IntoIterator<Item = G::Node>,
        cancel: Option<&CancellationToken>,
    ) -> Result<HashSet<(G::Node, G::Node)>> {
        let snapshot = self.snapshot()?;
        let sources: Vec<G::Node> = sources.into_iter().collect();
        let destinations: Vec<G::Node> = destinations.into_iter().collect();
        snapshot.coordinator().pairs(
            &sources,
            &destinations,
            self.config.default_mode,
            cancel,
            |source, destination| snapshot.can_reach(source, destination),
        )
    }

    /// Returns every node reachable from `node`, `node` itself included.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before the index is built.
    pub fn reachable_from(&self, node: G::Node) -> Result<Vec<G::Node>> {
        let snapshot = self.snapshot()?;
        Ok(match snapshot.component(node) {
            Some(component) => snapshot.expand(snapshot.closure.reachable(component)),
            None => vec![node],
        })
    }

    /// Returns every node that reaches `node`, `node` itself included.
    ///
    /// # Errors
    ///
    /// [`Error::NotBuilt`] before the index is built.
    pub fn reaching(&self, node: G::Node) -> Result<Vec<G::Node>> {
        let snapshot = self.snapshot()?;
        Ok(match snapshot.component(node) {
            Some(component) => snapshot.expand(snapshot.closure.reaching(component)),
            None => vec![node],
        })
    }
}

impl<G: GraphView> fmt::Debug for ReachabilityIndex<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReachabilityIndex")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("stats", &self.snapshot.as_ref().map(|s| &s.stats))
            .finish_non_exhaustive()
    }
}
