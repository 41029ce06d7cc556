//! Graph algorithms used by the reachability build.
//!
//! | Algorithm | Time Complexity | Use Case |
//! |-----------|-----------------|----------|
//! | SCC (Tarjan) | O(V + E) | Collapsing cycles before closure computation |
//! | Condensation | O(V + E) | Building the component DAG |
//! | Topological Sort (Kahn) | O(V + E) | Verifying and ordering DAGs |
//!
//! # Examples
//!
//! ```rust
//! use ontoreach::utils::graph::{algorithms, DirectedGraph};
//!
//! let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
//! let a = graph.add_node(());
//! let b = graph.add_node(());
//! let c = graph.add_node(());
//! graph.add_edge(a, b, ())?;
//! graph.add_edge(b, a, ())?;
//! graph.add_edge(b, c, ())?;
//!
//! let sccs = algorithms::strongly_connected_components(&graph);
//! assert_eq!(sccs.len(), 2);
//!
//! let (node_to_scc, edges) = algorithms::condensation(&graph, &sccs);
//! assert_eq!(node_to_scc[a.index()], node_to_scc[b.index()]);
//! assert_eq!(edges.len(), 1);
//! # Ok::<(), ontoreach::Error>(())
//! ```

mod scc;
mod topological;

pub use scc::{condensation, strongly_connected_components};
pub use topological::topological_sort;
