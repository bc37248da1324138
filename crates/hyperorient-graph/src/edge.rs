use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use hyperorient_core::errors::OrientError;

/// Bounds required of a vertex identifier.
///
/// Vertices are opaque, caller-owned values; the hypergraph only needs to
/// order, hash, compare and clone them. Ordering makes every iteration in
/// this crate deterministic.
pub trait Vertex: Ord + Hash + Clone + Debug {}

impl<T> Vertex for T where T: Ord + Hash + Clone + Debug {}

/// Immutable hyperedge: a non-empty set of vertices with an optional head.
///
/// Members are kept sorted and deduplicated, so two edges built from the same
/// vertices in different orders are equal. Equality, ordering and hashing
/// also cover the head: `{a, b}`, `{a, b} -> a` and `{a, b} -> b` are three
/// distinct values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<V> {
    members: Vec<V>,
    head: Option<V>,
}

impl<V: Vertex> Edge<V> {
    /// Creates an undirected edge over the provided vertices.
    pub fn new(members: impl IntoIterator<Item = V>) -> Result<Self, OrientError> {
        let members = canonicalize(members);
        if members.is_empty() {
            return Err(OrientError::value(
                "empty-edge",
                "edge must contain at least one vertex",
            ));
        }
        Ok(Self {
            members,
            head: None,
        })
    }

    /// Creates a directed edge whose head must be one of the members.
    pub fn with_head(members: impl IntoIterator<Item = V>, head: V) -> Result<Self, OrientError> {
        Self::new(members)?.reheaded(head)
    }

    /// Returns a copy of this edge headed at `head`.
    pub fn reheaded(&self, head: V) -> Result<Self, OrientError> {
        if !self.contains(&head) {
            return Err(OrientError::value("head-not-member", "edge has no such vertex")
                .with_context("edge", self.to_string())
                .with_context("head", format!("{head:?}")));
        }
        Ok(Self {
            members: self.members.clone(),
            head: Some(head),
        })
    }

    /// Returns a copy of this edge without a head.
    pub fn undirected(&self) -> Self {
        Self {
            members: self.members.clone(),
            head: None,
        }
    }

    /// Returns whether `vertex` is a member of the edge.
    pub fn contains(&self, vertex: &V) -> bool {
        self.members.binary_search(vertex).is_ok()
    }

    /// Iterates over member vertices in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.members.iter()
    }

    /// Member vertices in ascending order.
    pub fn members(&self) -> &[V] {
        &self.members
    }

    /// Number of member vertices (the arity).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: edges have at least one vertex.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Head vertex, if the edge is directed.
    pub fn head(&self) -> Option<&V> {
        self.head.as_ref()
    }

    /// Whether a head is set.
    pub fn is_directed(&self) -> bool {
        self.head.is_some()
    }

    /// Members other than the head. For an undirected edge this is every member.
    pub fn tail(&self) -> impl Iterator<Item = &V> + '_ {
        self.members
            .iter()
            .filter(move |vertex| Some(*vertex) != self.head.as_ref())
    }
}

impl<'a, V> IntoIterator for &'a Edge<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<V: Debug> Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, vertex) in self.members.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{vertex:?}")?;
        }
        write!(f, "}}")?;
        if let Some(head) = &self.head {
            write!(f, " -> {head:?}")?;
        }
        Ok(())
    }
}

fn canonicalize<V: Ord>(members: impl IntoIterator<Item = V>) -> Vec<V> {
    members.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}
