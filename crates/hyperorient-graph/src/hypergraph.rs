use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

use hyperorient_core::errors::{ErrorInfo, OrientError};
use hyperorient_core::WEIGHT_TOLERANCE;

use crate::edge::{Edge, Vertex};
use crate::flags::HypergraphConfig;

/// Weighted hypergraph with a directedness flag fixed at construction.
///
/// The edge set is the key set of the weight map, so an edge can never exist
/// without a weight or vice versa. Every member of every edge is a vertex of
/// the hypergraph; a directed hypergraph only holds headed edges and an
/// undirected one only headless edges.
#[derive(Debug, Clone)]
pub struct Hypergraph<V> {
    config: HypergraphConfig,
    vertices: BTreeSet<V>,
    edges: BTreeMap<Edge<V>, f64>,
}

impl<V: Vertex> Hypergraph<V> {
    /// Creates an empty hypergraph.
    pub fn new(directed: bool) -> Self {
        Self::with_config(HypergraphConfig::new(directed))
    }

    /// Creates an empty hypergraph with the provided configuration.
    pub fn with_config(config: HypergraphConfig) -> Self {
        Self {
            config,
            vertices: BTreeSet::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Builds a hypergraph from its parts.
    ///
    /// Edges missing from `weights` get weight 1.0; weights for edges not in
    /// `edges` are ignored. Each edge is validated like [`Self::add_edge`].
    pub fn from_parts(
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = Edge<V>>,
        weights: &BTreeMap<Edge<V>, f64>,
        directed: bool,
    ) -> Result<Self, OrientError> {
        Self::from_parts_with_config(vertices, edges, weights, HypergraphConfig::new(directed))
    }

    /// Same as [`Self::from_parts`] with an explicit configuration.
    pub fn from_parts_with_config(
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = Edge<V>>,
        weights: &BTreeMap<Edge<V>, f64>,
        config: HypergraphConfig,
    ) -> Result<Self, OrientError> {
        let mut graph = Self::with_config(config);
        graph.vertices.extend(vertices);
        for edge in edges {
            let weight = weights.get(&edge).copied().unwrap_or(1.0);
            graph.add_edge(edge, weight)?;
        }
        Ok(graph)
    }

    /// Returns the configuration used by this hypergraph.
    pub fn config(&self) -> &HypergraphConfig {
        &self.config
    }

    /// Whether edges of this hypergraph carry heads.
    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    /// Vertex set.
    pub fn vertices(&self) -> &BTreeSet<V> {
        &self.vertices
    }

    /// Edge set, in canonical order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge<V>> + '_ {
        self.edges.keys()
    }

    /// Weight of every edge, keyed by edge.
    pub fn weights(&self) -> &BTreeMap<Edge<V>, f64> {
        &self.edges
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether `vertex` belongs to the hypergraph.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// Returns whether `edge` (including its head) belongs to the hypergraph.
    pub fn contains_edge(&self, edge: &Edge<V>) -> bool {
        self.edges.contains_key(edge)
    }

    /// Weight of an edge.
    pub fn weight(&self, edge: &Edge<V>) -> Result<f64, OrientError> {
        self.edges
            .get(edge)
            .copied()
            .ok_or_else(|| unknown_edge(edge))
    }

    /// Adds a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        self.vertices.insert(vertex)
    }

    /// Removes a vertex together with every edge containing it.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<(), OrientError> {
        if !self.vertices.contains(vertex) {
            return Err(OrientError::Lookup(unknown_vertex(vertex)));
        }
        self.edges.retain(|edge, _| !edge.contains(vertex));
        self.vertices.remove(vertex);
        Ok(())
    }

    /// Adds an edge with the given weight, replacing the weight if the edge
    /// is already present.
    pub fn add_edge(&mut self, edge: Edge<V>, weight: f64) -> Result<(), OrientError> {
        self.validate_edge(&edge)?;
        if !(weight.is_finite() && weight > 0.0) {
            return Err(
                OrientError::value("invalid-weight", "edge weight must be positive and finite")
                    .with_context("edge", &edge)
                    .with_context("weight", weight),
            );
        }
        self.edges.insert(edge, weight);
        Ok(())
    }

    /// Removes an edge and its weight.
    pub fn remove_edge(&mut self, edge: &Edge<V>) -> Result<f64, OrientError> {
        self.edges.remove(edge).ok_or_else(|| unknown_edge(edge))
    }

    /// Returns whether every edge has exactly `k` vertices.
    pub fn uniform(&self, k: usize) -> bool {
        self.edges.keys().all(|edge| edge.len() == k)
    }

    /// Returns whether some edge contains both vertices, regardless of direction.
    pub fn adjacent(&self, u: &V, v: &V) -> bool {
        self.edges
            .keys()
            .any(|edge| edge.contains(u) && edge.contains(v))
    }

    /// Returns whether some edge contains both vertices and is headed at
    /// `head`. Identical to [`Self::adjacent`] for undirected hypergraphs.
    pub fn incident(&self, tail: &V, head: &V) -> bool {
        if !self.is_directed() {
            return self.adjacent(tail, head);
        }
        self.edges
            .keys()
            .any(|edge| edge.head() == Some(head) && edge.contains(tail))
    }

    /// Vertices adjacent to (undirected) or incident from (directed) `vertex`,
    /// excluding `vertex` itself.
    pub fn neighbors(&self, vertex: &V) -> BTreeSet<V> {
        let mut neighbors = BTreeSet::new();
        for edge in self.edges.keys().filter(|edge| edge.contains(vertex)) {
            if self.is_directed() {
                neighbors.extend(edge.head().cloned());
            } else {
                neighbors.extend(edge.iter().cloned());
            }
        }
        neighbors.remove(vertex);
        neighbors
    }

    /// Weight sum (or count) over edges containing `vertex`.
    pub fn degree(&self, vertex: &V, weighted: bool) -> f64 {
        self.load_where(weighted, |edge| edge.contains(vertex))
    }

    /// Weight sum (or count) over edges headed at `vertex`. Equals
    /// [`Self::degree`] on undirected hypergraphs.
    pub fn indegree(&self, vertex: &V, weighted: bool) -> f64 {
        if !self.is_directed() {
            return self.degree(vertex, weighted);
        }
        self.load_where(weighted, |edge| edge.head() == Some(vertex))
    }

    /// Weight sum (or count) over edges containing `vertex` but headed
    /// elsewhere. Equals [`Self::degree`] on undirected hypergraphs.
    pub fn outdegree(&self, vertex: &V, weighted: bool) -> f64 {
        if !self.is_directed() {
            return self.degree(vertex, weighted);
        }
        self.load_where(weighted, |edge| {
            edge.contains(vertex) && edge.head() != Some(vertex)
        })
    }

    /// Indegree of every vertex in one pass over the edges.
    pub fn indegrees(&self, weighted: bool) -> BTreeMap<V, f64> {
        let mut loads: BTreeMap<V, f64> =
            self.vertices.iter().map(|vertex| (vertex.clone(), 0.0)).collect();
        for (edge, weight) in &self.edges {
            let amount = if weighted { *weight } else { 1.0 };
            if let Some(head) = edge.head() {
                *loads.entry(head.clone()).or_default() += amount;
            } else {
                for member in edge {
                    *loads.entry(member.clone()).or_default() += amount;
                }
            }
        }
        loads
    }

    /// Largest indegree over all vertices, 0 for an empty hypergraph.
    pub fn max_indegree(&self, weighted: bool) -> f64 {
        self.indegrees(weighted).into_values().fold(0.0, f64::max)
    }

    pub(crate) fn validate_edge(&self, edge: &Edge<V>) -> Result<(), OrientError> {
        if let Some(missing) = edge.iter().find(|vertex| !self.vertices.contains(*vertex)) {
            return Err(OrientError::Value(unknown_vertex(missing)).with_context("edge", edge));
        }
        if edge.is_directed() != self.is_directed() {
            return Err(OrientError::value(
                "direction-mismatch",
                "edge headedness disagrees with hypergraph directedness",
            )
            .with_context("edge", edge)
            .with_context("directed", self.is_directed()));
        }
        if let Some(rule) = &self.config.arity {
            if !rule.validate(edge.len()) {
                return Err(OrientError::value(
                    "invalid-arity",
                    "edge violates the arity constraint",
                )
                .with_context("edge", edge)
                .with_context("arity", edge.len()));
            }
        }
        Ok(())
    }

    fn load_where(&self, weighted: bool, mut keep: impl FnMut(&Edge<V>) -> bool) -> f64 {
        self.edges
            .iter()
            .filter(|(edge, _)| keep(edge))
            .map(|(_, weight)| if weighted { *weight } else { 1.0 })
            .sum()
    }
}

impl<V: Vertex> PartialEq for Hypergraph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.edges.len() == other.edges.len()
            && self.edges.iter().all(|(edge, weight)| {
                other
                    .edges
                    .get(edge)
                    .is_some_and(|theirs| (weight - theirs).abs() < WEIGHT_TOLERANCE)
            })
    }
}

impl<V: Vertex> Display for Hypergraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hypergraph(vertices={:?}, edges=[", self.vertices)?;
        for (idx, (edge, weight)) in self.edges.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{edge}: {weight}")?;
        }
        write!(f, "], directed={})", self.is_directed())
    }
}

fn unknown_vertex<V: Vertex>(vertex: &V) -> ErrorInfo {
    ErrorInfo::new("unknown-vertex", "vertex does not exist")
        .with_context("vertex", format!("{vertex:?}"))
}

fn unknown_edge<V: Vertex>(edge: &Edge<V>) -> OrientError {
    OrientError::lookup("unknown-edge", "edge does not exist").with_context("edge", edge)
}
