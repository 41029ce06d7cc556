//! Precomputed reachability over directed labeled graphs.
//!
//! The index answers "is there a directed path from A to B?" in constant time once it has
//! been built. Construction runs in four stages, each in its own module:
//!
//! 1. **Filtering** ([`filter`]) - apply the build-time [`NodeFilter`] and relationship
//!    scoping, producing a dense [`FilteredGraph`]
//! 2. **Condensation** ([`condensation`]) - collapse strongly connected components into a
//!    DAG of [`ComponentId`]s
//! 3. **Closure** ([`closure`]) - compute the reflexive transitive closure of that DAG
//! 4. **Queries** ([`ReachabilityIndex`]) - point lookups plus batch queries executed by the
//!    internal batch coordinator, in parallel or sequentially ([`BatchMode`])
//!
//! # Lifecycle
//!
//! ```text
//! new / with_config ──► Uninitialized ──create_index──► Built
//!                            │                            │
//!                      queries fail with             queries served from an
//!                      Error::NotBuilt               immutable snapshot
//! ```
//!
//! There is no way back: the index captures one snapshot of the graph. Construct a new
//! index to observe later changes.
//!
//! # Thread Safety
//!
//! After `create_index` returns, the index is read-only and can be shared across threads;
//! `ReachabilityIndex<G>` is `Sync` whenever `G` is.

mod batch;
pub mod closure;
pub mod condensation;
mod config;
pub mod filter;
mod index;

pub use closure::ClosureTable;
pub use condensation::{ComponentId, Condensation};
pub use config::{BatchMode, IndexConfig};
pub use filter::{FilteredGraph, NodeFilter};
pub use index::{IndexState, IndexStats, ReachabilityIndex};
