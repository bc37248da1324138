use std::hash::{Hash, Hasher};

use hyperorient_core::WEIGHT_TOLERANCE;
use siphasher::sip::SipHasher13;

use crate::edge::Vertex;
use crate::flags::{Arity, HypergraphConfig};
use crate::hypergraph::Hypergraph;

/// Computes the canonical structural fingerprint of a hypergraph.
///
/// Covers configuration, vertices, edges (heads included) and weights
/// quantized to [`WEIGHT_TOLERANCE`], hashed with SipHash-1-3 under fixed
/// zero keys. Vertices are fed through their `Hash` impl, so the digest is
/// stable for a given vertex type and target.
pub fn canonical_fingerprint<V: Vertex>(graph: &Hypergraph<V>) -> String {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    encode_config(graph.config(), &mut hasher);

    hasher.write_u64(graph.vertex_count() as u64);
    for vertex in graph.vertices() {
        vertex.hash(&mut hasher);
    }

    hasher.write_u64(graph.edge_count() as u64);
    for (edge, weight) in graph.weights() {
        edge.hash(&mut hasher);
        hasher.write_i64(quantize(*weight));
    }

    format!("{:016x}", hasher.finish())
}

fn encode_config(config: &HypergraphConfig, hasher: &mut SipHasher13) {
    let direction: &[u8] = if config.directed {
        b"directed"
    } else {
        b"undirected"
    };
    hasher.write(direction);
    match config.arity {
        None => hasher.write(b"arity:none"),
        Some(Arity::Exact(k)) => {
            hasher.write(b"arity:exact");
            hasher.write_u64(k as u64);
        }
    }
}

fn quantize(weight: f64) -> i64 {
    (weight / WEIGHT_TOLERANCE).round() as i64
}
