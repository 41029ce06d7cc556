//! Directed graph infrastructure.
//!
//! # Architecture
//!
//! - **Identifiers**: [`NodeId`] and [`EdgeId`] newtypes keep dense indices apart
//! - **Storage**: [`DirectedGraph`] (generic node/edge data) and [`LabeledGraph`] (property
//!   nodes, [`RelationshipType`]-labeled edges)
//! - **Boundary**: [`GraphView`] is what the reachability index reads; any external graph
//!   store can implement it
//! - **Algorithms**: SCC decomposition, condensation and topological sorting over the dense
//!   [`GraphBase`] / [`Successors`] traits
//!
//! # Immutable After Construction
//!
//! Graphs are built incrementally, then treated as immutable for analysis. This is what
//! lets an index snapshot be shared between threads without locks.

mod directed;
mod ids;
mod labeled;
mod traits;

pub mod algorithms;

pub(crate) use ids::index_newtype;

pub use directed::DirectedGraph;
pub use ids::{EdgeId, NodeId};
pub use labeled::{Direction, LabeledGraph, RelationshipType};
pub use traits::{GraphBase, GraphView, Successors};
