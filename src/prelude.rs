//! # ontoreach Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the ontoreach library. Import this module to get quick access to everything needed
//! to build a graph, index it and run queries.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all ontoreach operations
pub use crate::Error;

/// The result type used throughout ontoreach
pub use crate::Result;

// ================================================================================================
// Reachability Index
// ================================================================================================

/// Main entry point: build once, query many times
pub use crate::reachability::{IndexState, IndexStats, ReachabilityIndex};

/// Build configuration and batch execution strategy
pub use crate::reachability::{BatchMode, IndexConfig};

/// Build-time exclusion filter
pub use crate::reachability::NodeFilter;

/// Cancellation handle for batch queries
pub use crate::utils::synchronization::CancellationToken;

// ================================================================================================
// Graph Model
// ================================================================================================

/// In-memory labeled graph and the view abstraction the index reads from
pub use crate::utils::graph::{Direction, GraphView, LabeledGraph, NodeId, RelationshipType};
