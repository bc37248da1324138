use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::ops::Deref;

use hyperorient_core::errors::OrientError;

use crate::edge::{Edge, Vertex};
use crate::flags::HypergraphConfig;
use crate::hypergraph::Hypergraph;

/// Hypergraph whose edges all have exactly two vertices.
///
/// Queries are available through `Deref`; mutators are re-exposed so the
/// arity rule is checked on every insertion, not only at construction.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    inner: Hypergraph<V>,
}

impl<V: Vertex> Graph<V> {
    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            inner: Hypergraph::with_config(HypergraphConfig::graph(directed)),
        }
    }

    /// Builds a graph from its parts, rejecting any edge that is not binary.
    pub fn from_parts(
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = Edge<V>>,
        weights: &BTreeMap<Edge<V>, f64>,
        directed: bool,
    ) -> Result<Self, OrientError> {
        let inner = Hypergraph::from_parts_with_config(
            vertices,
            edges,
            weights,
            HypergraphConfig::graph(directed),
        )?;
        Ok(Self { inner })
    }

    /// Every edge of a graph has two vertices, so this is just `k == 2`.
    pub fn uniform(&self, k: usize) -> bool {
        k == 2
    }

    /// See [`Hypergraph::add_vertex`].
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        self.inner.add_vertex(vertex)
    }

    /// See [`Hypergraph::remove_vertex`].
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<(), OrientError> {
        self.inner.remove_vertex(vertex)
    }

    /// See [`Hypergraph::add_edge`]; non-binary edges are rejected.
    pub fn add_edge(&mut self, edge: Edge<V>, weight: f64) -> Result<(), OrientError> {
        self.inner.add_edge(edge, weight)
    }

    /// See [`Hypergraph::remove_edge`].
    pub fn remove_edge(&mut self, edge: &Edge<V>) -> Result<f64, OrientError> {
        self.inner.remove_edge(edge)
    }

    /// Borrows the underlying hypergraph.
    pub fn as_hypergraph(&self) -> &Hypergraph<V> {
        &self.inner
    }

    /// Unwraps the underlying hypergraph.
    pub fn into_hypergraph(self) -> Hypergraph<V> {
        self.inner
    }
}

impl<V> Deref for Graph<V> {
    type Target = Hypergraph<V>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<V: Vertex> PartialEq for Graph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<V: Vertex> TryFrom<Hypergraph<V>> for Graph<V> {
    type Error = OrientError;

    fn try_from(hypergraph: Hypergraph<V>) -> Result<Self, Self::Error> {
        Self::from_parts(
            hypergraph.vertices().iter().cloned(),
            hypergraph.edges().cloned(),
            hypergraph.weights(),
            hypergraph.is_directed(),
        )
    }
}

impl<V: Vertex> From<Graph<V>> for Hypergraph<V> {
    fn from(graph: Graph<V>) -> Self {
        graph.inner
    }
}

impl<V: Vertex> Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.inner.to_string();
        write!(f, "Graph{}", rendered.trim_start_matches("Hypergraph"))
    }
}
