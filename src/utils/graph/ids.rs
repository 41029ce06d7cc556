//! Strongly-typed index identifiers.
//!
//! Every dense index in the crate (graph nodes, graph edges, strongly connected
//! components) is wrapped in its own newtype so that one kind of index can never be used
//! to address a table of another kind. All of them are `Copy`, hashable and ordered.

/// Declares a `usize` index newtype with `new`/`index`, `Debug`, `Display` and
/// `usize` conversions.
macro_rules! index_newtype {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Creates an identifier from a raw 0-based index.
            #[must_use]
            #[inline]
            pub const fn new(index: usize) -> Self {
                $name(index)
            }

            /// Returns the raw 0-based index, suitable for addressing per-item vectors.
            #[must_use]
            #[inline]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                $name(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

pub(crate) use index_newtype;

index_newtype!(
    /// Identifier of a node within a [`DirectedGraph`](crate::utils::graph::DirectedGraph)
    /// or [`LabeledGraph`](crate::utils::graph::LabeledGraph).
    ///
    /// Node ids are assigned sequentially from 0 as nodes are added.
    ///
    /// ```rust
    /// use ontoreach::NodeId;
    ///
    /// let node = NodeId::new(5);
    /// assert_eq!(node.index(), 5);
    /// assert_eq!(node.to_string(), "n5");
    /// ```
    NodeId,
    "n"
);

index_newtype!(
    /// Identifier of an edge within a [`DirectedGraph`](crate::utils::graph::DirectedGraph).
    EdgeId,
    "e"
);
