// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # ontoreach
//!
//! A precomputed reachability index over directed labeled property graphs, such as the
//! graphs produced by loading OWL ontologies (class hierarchies, part-of chains, and
//! similar relationship kinds).
//!
//! The index is built once over a (possibly cyclic) graph and then answers
//! "can node A reach node B" in constant time, with support for:
//!
//! - **Exclusion filters** - nodes rejected by a build-time predicate are removed from the
//!   reachable universe, together with every path routed through them
//! - **Relationship scoping** - only the configured relationship kinds and direction are followed
//! - **Batch queries** - `all_reachable_from`, `all_reaching` and `get_connect_pairs` run their
//!   independent checks on a worker pool with cooperative early exit
//! - **Cancellation** - batch queries accept a [`CancellationToken`] (explicit abort or deadline)
//!   and fail with [`Error::Cancelled`] instead of returning a partial answer
//!
//! ## Architecture
//!
//! Building an index runs three phases on the calling thread:
//!
//! 1. [`reachability::FilteredGraph`] - applies the exclusion filter and relationship scoping,
//!    assigning dense ids to eligible nodes
//! 2. [`reachability::Condensation`] - collapses strongly connected components (Tarjan) into a
//!    topologically ordered DAG
//! 3. [`reachability::ClosureTable`] - computes the transitive closure of every component over
//!    the DAG, one bit set per component
//!
//! The resulting snapshot is immutable and shared between concurrent readers without locks.
//!
//! ## Quick Start
//!
//! ```rust
//! use ontoreach::prelude::*;
//!
//! let mut graph: LabeledGraph<&str> = LabeledGraph::new();
//! let subclass = RelationshipType::new("subClassOf");
//! let neuron = graph.add_node("neuron");
//! let cell = graph.add_node("cell");
//! let thing = graph.add_node("thing");
//! graph.add_edge(neuron, cell, subclass.clone())?;
//! graph.add_edge(cell, thing, subclass)?;
//!
//! let mut index = ReachabilityIndex::new(&graph);
//! index.create_index(None)?;
//!
//! assert!(index.can_reach(neuron, thing)?);
//! assert!(!index.can_reach(thing, neuron)?);
//! # Ok::<(), ontoreach::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Queries issued before
//! [`ReachabilityIndex::create_index`] fail with [`Error::NotBuilt`]; they never default to
//! `false`. See [`Error`] for the full taxonomy.
//!
//! ## Logging
//!
//! The crate emits structured events through [`tracing`]; it never installs a subscriber.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use ontoreach::prelude::*;
///
/// let graph: LabeledGraph<()> = LabeledGraph::new();
/// let mut index = ReachabilityIndex::new(&graph);
/// index.create_index(None)?;
/// assert!(index.is_built());
/// # Ok::<(), ontoreach::Error>(())
/// ```
pub mod prelude;

/// The reachability index and its build pipeline.
///
/// # Key Types
///
/// - [`reachability::ReachabilityIndex`] - Façade: build once, query many times
/// - [`reachability::NodeFilter`] - Build-time exclusion predicate
/// - [`reachability::IndexConfig`] - Relationship scoping and worker pool configuration
/// - [`reachability::BatchMode`] - Execution strategy for batch queries
pub mod reachability;

/// Generic infrastructure: graph types and algorithms, bit sets, synchronization.
pub mod utils;

/// `ontoreach` Result type.
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
pub use reachability::{
    BatchMode, IndexConfig, IndexState, IndexStats, NodeFilter, ReachabilityIndex,
};
pub use utils::graph::{Direction, GraphView, LabeledGraph, NodeId, RelationshipType};
pub use utils::synchronization::CancellationToken;
