//! Transitive closure over the component DAG.
//!
//! Each component owns a row listing every component reachable from it, itself included.
//! Because component ids are in reverse topological order, every successor of a component
//! has a lower id; walking the ids upward therefore finds every successor row already
//! complete, and a row is the component itself plus the union of its successors' rows.
//!
//! Rows are stored in whichever form is smaller. A row reaching few components is a sorted
//! id list, so a hierarchy with shallow ancestor chains costs memory proportional to the
//! number of reachable pairs. A row reaching a large share of the components is a
//! [`BitSet`], which caps the cost of long chains at one bit per component.

use std::mem;

use crate::{
    reachability::condensation::{ComponentId, Condensation},
    utils::BitSet,
};

/// Bits one sorted-list entry occupies.
const LIST_ENTRY_BITS: usize = mem::size_of::<ComponentId>() * 8;

/// Components reachable from one component.
#[derive(Debug, Clone)]
enum Row {
    /// Sorted, duplicate-free
    List(Box<[ComponentId]>),
    Bits(BitSet),
}

impl Row {
    /// Picks the smaller representation for `members` out of `capacity` components.
    fn from_members(members: &mut [ComponentId], capacity: usize) -> Self {
        if members.len().saturating_mul(LIST_ENTRY_BITS) > capacity {
            let mut bits = BitSet::new(capacity);
            for member in members.iter() {
                bits.insert(member.index());
            }
            Row::Bits(bits)
        } else {
            members.sort_unstable();
            Row::List(Box::from(&*members))
        }
    }

    #[inline]
    fn contains(&self, component: ComponentId) -> bool {
        match self {
            Row::List(ids) => ids.binary_search(&component).is_ok(),
            Row::Bits(bits) => bits.contains(component.index()),
        }
    }

    /// Members in ascending id order.
    fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        let (list, bits) = match self {
            Row::List(ids) => (Some(ids.iter().copied()), None),
            Row::Bits(bits) => (None, Some(bits.iter().map(ComponentId::new))),
        };
        list.into_iter().flatten().chain(bits.into_iter().flatten())
    }

    fn len(&self) -> usize {
        match self {
            Row::List(ids) => ids.len(),
            Row::Bits(bits) => bits.count(),
        }
    }

    fn heap_bytes(&self) -> usize {
        match self {
            Row::List(ids) => mem::size_of_val::<[ComponentId]>(ids),
            Row::Bits(bits) => bits.heap_bytes(),
        }
    }
}

/// Reflexive transitive closure of a [`Condensation`].
#[derive(Debug, Clone)]
pub struct ClosureTable {
    rows: Vec<Row>,
}

impl ClosureTable {
    /// Computes the closure of every component.
    ///
    /// Work is proportional to the sum of the successor rows' sizes; memory per row is
    /// the smaller of its member list and a bit per component.
    pub fn build(condensation: &Condensation) -> Self {
        let count = condensation.component_count();
        let mut rows: Vec<Row> = Vec::with_capacity(count);
        let mut collected = BitSet::new(count);
        let mut members: Vec<ComponentId> = Vec::new();

        for component in condensation.components() {
            members.clear();
            collected.insert(component.index());
            members.push(component);

            for &successor in condensation.component_successors(component) {
                for reached in rows[successor.index()].iter() {
                    if !collected.contains(reached.index()) {
                        collected.insert(reached.index());
                        members.push(reached);
                    }
                }
            }

            for member in &members {
                collected.remove(member.index());
            }
            rows.push(Row::from_members(&mut members, count));
        }

        ClosureTable { rows }
    }

    /// Returns `true` if `to` is reachable from `from`; every component reaches itself.
    #[must_use]
    #[inline]
    pub fn reaches(&self, from: ComponentId, to: ComponentId) -> bool {
        self.rows
            .get(from.index())
            .is_some_and(|row| row.contains(to))
    }

    /// Iterates the components reachable from `from` in ascending id order.
    pub fn reachable(&self, from: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        self.rows.get(from.index()).into_iter().flat_map(Row::iter)
    }

    /// Iterates the components from which `to` is reachable.
    pub fn reaching(&self, to: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, row)| row.contains(to))
            .map(|(index, _)| ComponentId::new(index))
    }

    /// Number of components covered.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of (from, to) component pairs in the closure, reflexive pairs included.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Bytes of heap storage held by the table.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.rows.len() * mem::size_of::<Row>()
            + self.rows.iter().map(Row::heap_bytes).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::graph::{DirectedGraph, NodeId};

    fn closure_of(n: usize, edges: &[(usize, usize)]) -> (Condensation, ClosureTable, Vec<NodeId>) {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let nodes: Vec<NodeId> = (0..n).map(|_| graph.add_node(())).collect();
        for &(s, t) in edges {
            graph.add_edge(nodes[s], nodes[t], ()).unwrap();
        }
        let condensation = Condensation::build(&graph);
        let closure = ClosureTable::build(&condensation);
        (condensation, closure, nodes)
    }

    #[test]
    fn test_empty() {
        let (_, closure, _) = closure_of(0, &[]);
        assert_eq!(closure.component_count(), 0);
        assert_eq!(closure.entry_count(), 0);
        assert!(!closure.reaches(ComponentId::new(0), ComponentId::new(0)));
    }

    #[test]
    fn test_chain_is_transitive_and_reflexive() {
        // 0 -> 1 -> 2 -> 3
        let (cond, closure, n) = closure_of(4, &[(0, 1), (1, 2), (2, 3)]);
        let c = |i: usize| cond.component_of(n[i]).unwrap();

        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(closure.reaches(c(i), c(j)), i <= j, "{i} -> {j}");
            }
        }
        // 4 + 3 + 2 + 1
        assert_eq!(closure.entry_count(), 10);
    }

    #[test]
    fn test_diamond_with_cycle() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3, 3 <-> 4
        let (cond, closure, n) = closure_of(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 3)]);
        let c = |i: usize| cond.component_of(n[i]).unwrap();

        assert!(closure.reaches(c(0), c(4)));
        assert!(closure.reaches(c(4), c(3)));
        assert!(!closure.reaches(c(1), c(2)));
        assert!(!closure.reaches(c(3), c(0)));

        let from_root: Vec<ComponentId> = closure.reachable(c(0)).collect();
        assert_eq!(from_root.len(), 4);
        assert!(from_root.windows(2).all(|w| w[0] < w[1]));

        let mut into_sink: Vec<ComponentId> = closure.reaching(c(3)).collect();
        into_sink.sort();
        let mut expected = vec![c(0), c(1), c(2), c(3)];
        expected.sort();
        assert_eq!(into_sink, expected);
    }

    #[test]
    fn test_unknown_component_reaches_nothing() {
        let (_, closure, _) = closure_of(2, &[(0, 1)]);
        assert_eq!(closure.reachable(ComponentId::new(7)).count(), 0);
        assert!(!closure.reaches(ComponentId::new(7), ComponentId::new(0)));
        assert!(!closure.reaches(ComponentId::new(0), ComponentId::new(7)));
    }

    #[test]
    fn test_long_chain_mixes_row_forms() {
        // Rows near the sink are short lists, rows near the head are bit sets
        let n = 300;
        let edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        let (cond, closure, nodes) = closure_of(n, &edges);
        let c = |i: usize| cond.component_of(nodes[i]).unwrap();

        assert!(closure.rows.iter().any(|row| matches!(row, Row::List(_))));
        assert!(closure.rows.iter().any(|row| matches!(row, Row::Bits(_))));

        for i in (0..n).step_by(7) {
            for j in (0..n).step_by(11) {
                assert_eq!(closure.reaches(c(i), c(j)), i <= j, "{i} -> {j}");
            }
            let reached: Vec<ComponentId> = closure.reachable(c(i)).collect();
            assert_eq!(reached.len(), n - i);
            assert!(reached.windows(2).all(|w| w[0] < w[1]));
        }
        assert_eq!(closure.entry_count(), n * (n + 1) / 2);

        // Never above one bit per component per row, plus row headers
        let dense_bound = n * (n.div_ceil(64) * 8 + mem::size_of::<Row>());
        assert!(closure.heap_bytes() <= dense_bound);
    }

    #[test]
    fn test_wide_shallow_tree_stays_proportional_to_pairs() {
        // i -> i / 4: every row is an ancestor path of at most a handful of entries
        let n = 20_000;
        let edges: Vec<(usize, usize)> = (1..n).map(|i| (i, i / 4)).collect();
        let (cond, closure, nodes) = closure_of(n, &edges);

        assert!(closure.rows.iter().all(|row| matches!(row, Row::List(_))));
        let expected: usize = (0..n)
            .map(|mut i| {
                let mut len = 1;
                while i > 0 {
                    i /= 4;
                    len += 1;
                }
                len
            })
            .sum();
        assert_eq!(closure.entry_count(), expected);
        assert!(
            closure.heap_bytes()
                <= expected * mem::size_of::<ComponentId>() + n * mem::size_of::<Row>()
        );

        let c = |i: usize| cond.component_of(nodes[i]).unwrap();
        assert!(closure.reaches(c(n - 1), c(0)));
        assert!(!closure.reaches(c(0), c(n - 1)));
        assert!(!closure.reaches(c(5), c(6)));
    }
}
