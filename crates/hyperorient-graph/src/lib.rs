#![deny(missing_docs)]

//! Vertex-generic hypergraphs with weighted, optionally headed edges.
//!
//! A [`Hypergraph`] owns its vertex set and an edge→weight map; its
//! directedness is fixed when it is created. [`Graph`] is the binary
//! specialization. Orientation algorithms live in `hyperorient-solve`.

mod edge;
mod flags;
mod graph;
mod hash;
mod hypergraph;

pub use edge::{Edge, Vertex};
pub use flags::{Arity, HypergraphConfig};
pub use graph::Graph;
pub use hash::canonical_fingerprint;
pub use hypergraph::Hypergraph;
