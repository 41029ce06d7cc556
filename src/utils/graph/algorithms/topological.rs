//! Topological sorting for directed acyclic graphs (DAGs).
//!
//! Kahn's algorithm: repeatedly emit a node with no remaining incoming edges. A graph
//! has a topological order if and only if it is acyclic.

use std::collections::VecDeque;

use crate::utils::graph::{NodeId, Successors};

/// Computes a topological ordering of all nodes.
///
/// For every edge `(u, v)`, `u` precedes `v` in the returned order. Ties are broken by
/// ascending `NodeId`, so the result is deterministic.
///
/// # Returns
///
/// `Some(order)` if the graph is acyclic, `None` if it contains a cycle (self-loops
/// included).
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V)
///
/// # Examples
///
/// ```rust
/// use ontoreach::utils::graph::{algorithms::topological_sort, DirectedGraph};
///
/// let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// graph.add_edge(b, a, ())?;
/// assert_eq!(topological_sort(&graph), Some(vec![b, a]));
///
/// graph.add_edge(a, b, ())?;
/// assert_eq!(topological_sort(&graph), None);
/// # Ok::<(), ontoreach::Error>(())
/// ```
pub fn topological_sort<G>(graph: &G) -> Option<Vec<NodeId>>
where
    G: Successors,
{
    let node_count = graph.node_count();

    let mut in_degree: Vec<usize> = vec![0; node_count];
    for node in graph.node_ids() {
        for successor in graph.successors(node) {
            in_degree[successor.index()] += 1;
        }
    }

    let mut queue: VecDeque<NodeId> = graph
        .node_ids()
        .filter(|node| in_degree[node.index()] == 0)
        .collect();
    let mut order = Vec::with_capacity(node_count);

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for successor in graph.successors(node) {
            in_degree[successor.index()] -= 1;
            if in_degree[successor.index()] == 0 {
                queue.push_back(successor);
            }
        }
    }

    // Nodes left unprocessed sit on or behind a cycle
    (order.len() == node_count).then_some(order)
}

#[cfg(test)]
mod tests {
    use crate::utils::graph::{algorithms::topological::topological_sort, DirectedGraph, NodeId};

    #[test]
    fn test_topological_sort_empty_graph() {
        let graph: DirectedGraph<(), ()> = DirectedGraph::new();
        assert_eq!(topological_sort(&graph), Some(Vec::new()));
    }

    #[test]
    fn test_topological_sort_diamond() {
        let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        let d = graph.add_node("D");
        graph.add_edge(a, b, ()).unwrap();
        graph.add_edge(a, c, ()).unwrap();
        graph.add_edge(b, d, ()).unwrap();
        graph.add_edge(c, d, ()).unwrap();

        let order = topological_sort(&graph).unwrap();
        assert_eq!(order.len(), 4);

        let pos = |n: NodeId| order.iter().position(|&x| x == n).unwrap();
        assert!(pos(a) < pos(b));
        assert!(pos(a) < pos(c));
        assert!(pos(b) < pos(d));
        assert!(pos(c) < pos(d));
    }

    #[test]
    fn test_topological_sort_self_loop_is_cycle() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let a = graph.add_node(());
        graph.add_edge(a, a, ()).unwrap();
        assert!(topological_sort(&graph).is_none());
    }

    #[test]
    fn test_topological_sort_parallel_edges() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, ()).unwrap();
        graph.add_edge(a, b, ()).unwrap();
        assert_eq!(topological_sort(&graph), Some(vec![a, b]));
    }
}
