//! Strongly Connected Components (SCC) using Tarjan's algorithm.
//!
//! A strongly connected component is a maximal set of vertices such that there is a path
//! from every vertex to every other vertex in the set. Every member of a cycle ends up in
//! the same component, which is what lets reachability over a cyclic graph be reduced to
//! reachability over a DAG of components.
//!
//! The traversal is iterative: ontology hierarchies routinely contain chains deep enough
//! to overflow the thread stack with a recursive depth-first search.

use std::collections::HashSet;

use crate::utils::graph::{NodeId, Successors};

/// Computes the strongly connected components of a directed graph.
///
/// # Returns
///
/// A vector of SCCs, where each SCC is a vector of `NodeId`s. The SCCs are returned in
/// **reverse topological order**: if there's an edge from SCC A to SCC B, then A appears
/// after B in the result.
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V + E) (successor lists are buffered per active frame)
///
/// # Examples
///
/// ```rust
/// use ontoreach::utils::graph::{algorithms::strongly_connected_components, DirectedGraph};
///
/// // Simple cycle: A -> B -> C -> A
/// let mut graph: DirectedGraph<char, ()> = DirectedGraph::new();
/// let a = graph.add_node('A');
/// let b = graph.add_node('B');
/// let c = graph.add_node('C');
/// graph.add_edge(a, b, ())?;
/// graph.add_edge(b, c, ())?;
/// graph.add_edge(c, a, ())?;
///
/// let sccs = strongly_connected_components(&graph);
/// assert_eq!(sccs.len(), 1);
/// assert_eq!(sccs[0].len(), 3);
/// # Ok::<(), ontoreach::Error>(())
/// ```
pub fn strongly_connected_components<G>(graph: &G) -> Vec<Vec<NodeId>>
where
    G: Successors,
{
    let node_count = graph.node_count();
    if node_count == 0 {
        return Vec::new();
    }

    let mut state = TarjanState::new(node_count);
    for node in graph.node_ids() {
        if state.index[node.index()].is_none() {
            state.strongconnect(graph, node);
        }
    }

    state.sccs
}

/// One suspended `strongconnect` call on the explicit DFS stack.
struct Frame {
    node: NodeId,
    successors: Vec<NodeId>,
    next: usize,
}

/// Internal state for Tarjan's algorithm.
struct TarjanState {
    /// Discovery index for each node (None if not yet visited)
    index: Vec<Option<usize>>,
    /// Lowlink value for each node
    lowlink: Vec<usize>,
    /// Whether a node is currently on the component stack
    on_stack: Vec<bool>,
    /// The component stack
    stack: Vec<NodeId>,
    /// Current index counter
    current_index: usize,
    /// Collected SCCs
    sccs: Vec<Vec<NodeId>>,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            current_index: 0,
            sccs: Vec::new(),
        }
    }

    fn discover<G: Successors>(&mut self, graph: &G, v: NodeId) -> Frame {
        let v_idx = v.index();
        self.index[v_idx] = Some(self.current_index);
        self.lowlink[v_idx] = self.current_index;
        self.current_index += 1;
        self.stack.push(v);
        self.on_stack[v_idx] = true;

        Frame {
            node: v,
            successors: graph.successors(v).collect(),
            next: 0,
        }
    }

    fn strongconnect<G: Successors>(&mut self, graph: &G, root: NodeId) {
        let mut frames = vec![self.discover(graph, root)];

        while let Some(frame) = frames.last_mut() {
            let v_idx = frame.node.index();

            if let Some(&w) = frame.successors.get(frame.next) {
                frame.next += 1;
                match self.index[w.index()] {
                    None => {
                        let child = self.discover(graph, w);
                        frames.push(child);
                    }
                    Some(w_index) if self.on_stack[w.index()] => {
                        // w is on the stack and hence in the current SCC
                        self.lowlink[v_idx] = self.lowlink[v_idx].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All successors explored: propagate lowlink to the parent frame
            let v = frame.node;
            frames.pop();
            if let Some(parent) = frames.last() {
                let p_idx = parent.node.index();
                self.lowlink[p_idx] = self.lowlink[p_idx].min(self.lowlink[v_idx]);
            }

            if Some(self.lowlink[v_idx]) == self.index[v_idx] {
                let mut scc = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w.index()] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                self.sccs.push(scc);
            }
        }
    }
}

/// Returns the condensation of a graph: each SCC collapsed to a single vertex.
///
/// # Arguments
///
/// * `graph` - The original graph
/// * `sccs` - The SCCs as returned by [`strongly_connected_components`]
///
/// # Returns
///
/// A tuple containing:
/// - A vector mapping each original node to its SCC index
/// - The deduplicated edges `(from_scc, to_scc)` of the condensation DAG; edges inside an
///   SCC (including self-loops) are dropped
pub fn condensation<G>(graph: &G, sccs: &[Vec<NodeId>]) -> (Vec<usize>, Vec<(usize, usize)>)
where
    G: Successors,
{
    let node_count = graph.node_count();

    let mut node_to_scc = vec![0; node_count];
    for (scc_idx, scc) in sccs.iter().enumerate() {
        for &node in scc {
            node_to_scc[node.index()] = scc_idx;
        }
    }

    let mut edges = Vec::new();
    let mut seen_edges = HashSet::new();

    for from_node in graph.node_ids() {
        let from_scc = node_to_scc[from_node.index()];
        for to_node in graph.successors(from_node) {
            let to_scc = node_to_scc[to_node.index()];
            if from_scc != to_scc && seen_edges.insert((from_scc, to_scc)) {
                edges.push((from_scc, to_scc));
            }
        }
    }

    (node_to_scc, edges)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::utils::graph::{
        algorithms::scc::{condensation, strongly_connected_components},
        DirectedGraph, NodeId,
    };

    #[test]
    fn test_scc_empty_graph() {
        let graph: DirectedGraph<(), ()> = DirectedGraph::new();
        assert!(strongly_connected_components(&graph).is_empty());
    }

    #[test]
    fn test_scc_single_node_self_loop() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let a = graph.add_node(());
        graph.add_edge(a, a, ()).unwrap();

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs, vec![vec![a]]);

        let (_, edges) = condensation(&graph, &sccs);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_scc_linear_chain_reverse_topological() {
        // A -> B -> C
        let mut graph: DirectedGraph<char, ()> = DirectedGraph::new();
        let a = graph.add_node('A');
        let b = graph.add_node('B');
        let c = graph.add_node('C');
        graph.add_edge(a, b, ()).unwrap();
        graph.add_edge(b, c, ()).unwrap();

        let sccs = strongly_connected_components(&graph);
        let scc_nodes: Vec<NodeId> = sccs.iter().map(|scc| scc[0]).collect();
        assert_eq!(scc_nodes, vec![c, b, a]);
    }

    #[test]
    fn test_scc_two_node_cycle_with_tail() {
        // A <-> C, B -> A: B is not part of the cycle
        let mut graph: DirectedGraph<char, ()> = DirectedGraph::new();
        let a = graph.add_node('A');
        let b = graph.add_node('B');
        let c = graph.add_node('C');
        graph.add_edge(a, c, ()).unwrap();
        graph.add_edge(c, a, ()).unwrap();
        graph.add_edge(b, a, ()).unwrap();

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 2);

        let cycle: HashSet<NodeId> = sccs[0].iter().copied().collect();
        assert_eq!(cycle, [a, c].into_iter().collect());
        assert_eq!(sccs[1], vec![b]);
    }

    #[test]
    fn test_scc_complex_structure() {
        //     +---+
        //     v   |
        // A-->B-->C
        // |   |
        // v   v
        // D<->E-->F-->G
        let mut graph: DirectedGraph<char, ()> = DirectedGraph::new();
        let a = graph.add_node('A');
        let b = graph.add_node('B');
        let c = graph.add_node('C');
        let d = graph.add_node('D');
        let e = graph.add_node('E');
        let f = graph.add_node('F');
        let g = graph.add_node('G');

        for (s, t) in [(a, b), (b, c), (c, b), (a, d), (b, e), (d, e), (e, d), (e, f), (f, g)] {
            graph.add_edge(s, t, ()).unwrap();
        }

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 5);

        let position =
            |node: NodeId| -> usize { sccs.iter().position(|scc| scc.contains(&node)).unwrap() };
        assert_eq!(position(b), position(c));
        assert_eq!(position(d), position(e));
        // Every edge goes from a later to an earlier component
        assert!(position(a) > position(b));
        assert!(position(b) > position(e));
        assert!(position(e) > position(f));
        assert!(position(f) > position(g));
    }

    #[test]
    fn test_scc_deep_chain_does_not_overflow() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let nodes: Vec<NodeId> = (0..200_000).map(|_| graph.add_node(())).collect();
        for pair in nodes.windows(2) {
            graph.add_edge(pair[0], pair[1], ()).unwrap();
        }
        // Close the loop so the whole chain is one component
        graph.add_edge(nodes[nodes.len() - 1], nodes[0], ()).unwrap();

        let sccs = strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 200_000);
    }

    #[test]
    fn test_condensation_chain() {
        // (A<->B) -> (C<->D) -> E, plus a duplicate edge A -> C
        let mut graph: DirectedGraph<char, ()> = DirectedGraph::new();
        let a = graph.add_node('A');
        let b = graph.add_node('B');
        let c = graph.add_node('C');
        let d = graph.add_node('D');
        let e = graph.add_node('E');

        for (s, t) in [(a, b), (b, a), (b, c), (a, c), (c, d), (d, c), (d, e)] {
            graph.add_edge(s, t, ()).unwrap();
        }

        let sccs = strongly_connected_components(&graph);
        let (node_to_scc, edges) = condensation(&graph, &sccs);

        assert_eq!(node_to_scc[a.index()], node_to_scc[b.index()]);
        assert_eq!(node_to_scc[c.index()], node_to_scc[d.index()]);
        assert_ne!(node_to_scc[a.index()], node_to_scc[c.index()]);
        assert_eq!(edges.len(), 2);
        for (from, to) in edges {
            assert!(from > to);
        }
    }
}
