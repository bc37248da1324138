/// Configuration fixed when a [`Hypergraph`](crate::Hypergraph) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HypergraphConfig {
    /// Whether every edge carries a head (directed) or none does (undirected).
    pub directed: bool,
    /// Optional arity constraint enforced on every edge.
    pub arity: Option<Arity>,
}

impl HypergraphConfig {
    /// Unconstrained configuration with the given directedness.
    pub const fn new(directed: bool) -> Self {
        Self {
            directed,
            arity: None,
        }
    }

    /// Configuration of a graph: every edge has exactly two vertices.
    pub const fn graph(directed: bool) -> Self {
        Self {
            directed,
            arity: Some(Arity::Exact(2)),
        }
    }
}

/// Describes the arity constraint applied to newly added edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Every edge has exactly this many vertices.
    Exact(usize),
}

impl Arity {
    /// Validates an edge arity against this rule.
    pub fn validate(&self, len: usize) -> bool {
        match self {
            Arity::Exact(k) => len == *k,
        }
    }
}
