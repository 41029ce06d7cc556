//! Component DAG over the filtered graph.
//!
//! Every node of a strongly connected component reaches every other member, so the index
//! only needs to track reachability between components. [`Condensation`] collapses each
//! SCC of a [`FilteredGraph`](super::FilteredGraph) to a single [`ComponentId`] and keeps
//! the deduplicated edges between them.
//!
//! Component ids follow the order in which Tarjan's algorithm completes the components,
//! which is a reverse topological order: every condensation edge runs from a higher id to a
//! lower id. The closure computation relies on this to process components bottom-up without
//! a separate sort.

use crate::utils::graph::{
    algorithms::{condensation, strongly_connected_components, topological_sort},
    index_newtype, GraphBase, NodeId, Successors,
};

index_newtype!(
    /// Identifier of a strongly connected component in a [`Condensation`].
    ComponentId,
    "c"
);

/// Strongly connected components of a graph and the DAG between them.
#[derive(Debug, Clone)]
pub struct Condensation {
    node_component: Vec<ComponentId>,
    members: Vec<Vec<NodeId>>,
    successors: Vec<Vec<ComponentId>>,
    edge_count: usize,
}

impl Condensation {
    /// Computes the condensation of `graph`.
    pub fn build<G: Successors>(graph: &G) -> Self {
        let members = strongly_connected_components(graph);
        let (node_to_scc, edges) = condensation(graph, &members);

        let mut successors = vec![Vec::new(); members.len()];
        for &(from, to) in &edges {
            debug_assert!(from > to, "condensation edge c{from} -> c{to} breaks id order");
            successors[from].push(ComponentId::new(to));
        }

        let result = Condensation {
            node_component: node_to_scc.into_iter().map(ComponentId::new).collect(),
            members,
            successors,
            edge_count: edges.len(),
        };
        debug_assert!(topological_sort(&result).is_some());
        result
    }

    /// Returns the component containing a dense node id.
    #[must_use]
    #[inline]
    pub fn component_of(&self, node: NodeId) -> Option<ComponentId> {
        self.node_component.get(node.index()).copied()
    }

    /// Returns the dense node ids belonging to `component`.
    #[must_use]
    pub fn members(&self, component: ComponentId) -> &[NodeId] {
        self.members
            .get(component.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the components directly reachable from `component`.
    #[must_use]
    pub fn component_successors(&self, component: ComponentId) -> &[ComponentId] {
        self.successors
            .get(component.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.members.len()
    }

    /// Number of distinct edges between components.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Size of the largest component.
    #[must_use]
    pub fn largest_component(&self) -> usize {
        self.members.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterates the component ids in reverse topological order.
    pub fn components(&self) -> impl Iterator<Item = ComponentId> {
        (0..self.members.len()).map(ComponentId::new)
    }
}

impl GraphBase for Condensation {
    fn node_count(&self) -> usize {
        self.members.len()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.members.len()).map(NodeId::new)
    }
}

impl Successors for Condensation {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.component_successors(ComponentId::new(node.index()))
            .iter()
            .map(|c| NodeId::new(c.index()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::graph::DirectedGraph;

    fn graph_from(n: usize, edges: &[(usize, usize)]) -> (DirectedGraph<(), ()>, Vec<NodeId>) {
        let mut graph = DirectedGraph::new();
        let nodes: Vec<NodeId> = (0..n).map(|_| graph.add_node(())).collect();
        for &(s, t) in edges {
            graph.add_edge(nodes[s], nodes[t], ()).unwrap();
        }
        (graph, nodes)
    }

    #[test]
    fn test_empty_graph() {
        let (graph, _) = graph_from(0, &[]);
        let cond = Condensation::build(&graph);
        assert_eq!(cond.component_count(), 0);
        assert_eq!(cond.edge_count(), 0);
        assert_eq!(cond.largest_component(), 0);
    }

    #[test]
    fn test_cycle_collapses_to_one_component() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3
        let (graph, n) = graph_from(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let cond = Condensation::build(&graph);

        assert_eq!(cond.component_count(), 2);
        let cycle = cond.component_of(n[0]).unwrap();
        assert_eq!(cond.component_of(n[1]), Some(cycle));
        assert_eq!(cond.component_of(n[2]), Some(cycle));
        assert_eq!(cond.members(cycle).len(), 3);
        assert_eq!(cond.largest_component(), 3);

        let tail = cond.component_of(n[3]).unwrap();
        assert_eq!(cond.component_successors(cycle), &[tail]);
        assert!(cond.component_successors(tail).is_empty());
    }

    #[test]
    fn test_edges_point_to_lower_ids() {
        let (graph, _) = graph_from(
            6,
            &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2), (0, 4), (4, 5), (5, 3)],
        );
        let cond = Condensation::build(&graph);
        for c in cond.components() {
            for &d in cond.component_successors(c) {
                assert!(c > d, "{c} -> {d}");
            }
        }
    }

    #[test]
    fn test_parallel_inter_component_edges_deduplicated() {
        // {0,1} -> {2,3} via two distinct edges
        let (graph, _) = graph_from(4, &[(0, 1), (1, 0), (2, 3), (3, 2), (0, 2), (1, 3)]);
        let cond = Condensation::build(&graph);
        assert_eq!(cond.component_count(), 2);
        assert_eq!(cond.edge_count(), 1);
    }

    #[test]
    fn test_out_of_range_queries_are_empty() {
        let (graph, _) = graph_from(1, &[]);
        let cond = Condensation::build(&graph);
        assert_eq!(cond.component_of(NodeId::new(10)), None);
        assert!(cond.members(ComponentId::new(10)).is_empty());
        assert!(cond.component_successors(ComponentId::new(10)).is_empty());
    }
}
