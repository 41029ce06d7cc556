//! Shared infrastructure used by the reachability index.
//!
//! - [`graph`] - Directed graph types, the [`graph::GraphView`] collaborator boundary and
//!   the SCC / topological algorithms
//! - [`BitSet`] - Dense bit vector used for per-component closure sets
//! - [`synchronization`] - Cancellation tokens and monotonic signals for batch workers

mod bitset;

pub mod graph;
pub mod synchronization;

pub use bitset::{BitSet, BitSetIter};
