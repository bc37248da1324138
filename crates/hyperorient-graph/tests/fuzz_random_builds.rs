use std::collections::BTreeSet;

use hyperorient_graph::{canonical_fingerprint, Edge, Hypergraph};
use proptest::prelude::*;

fn build(vertices: u8, raw_edges: &[(Vec<u8>, u8)], directed: bool) -> Hypergraph<u8> {
    let mut graph = Hypergraph::new(directed);
    for v in 0..vertices {
        graph.add_vertex(v);
    }
    for (members, weight) in raw_edges {
        let members: BTreeSet<u8> = members.iter().map(|m| m % vertices).collect();
        let edge = if directed {
            let head = *members.iter().next().unwrap();
            Edge::with_head(members, head).unwrap()
        } else {
            Edge::new(members).unwrap()
        };
        graph.add_edge(edge, f64::from(*weight) + 1.0).unwrap();
    }
    graph
}

fn check_invariants(graph: &Hypergraph<u8>) {
    assert_eq!(graph.weights().len(), graph.edge_count());
    for edge in graph.edges() {
        assert!(!edge.is_empty());
        assert_eq!(edge.is_directed(), graph.is_directed());
        for member in edge {
            assert!(graph.contains_vertex(member));
        }
    }
}

proptest! {
    #[test]
    fn vertex_removal_cascades(
        vertices in 2u8..8,
        raw_edges in prop::collection::vec((prop::collection::vec(any::<u8>(), 1..4), 0u8..5), 0..10),
        victim in any::<u8>(),
        directed in any::<bool>(),
    ) {
        let mut graph = build(vertices, &raw_edges, directed);
        check_invariants(&graph);
        let victim = victim % vertices;
        let survivors = graph.edges().filter(|edge| !edge.contains(&victim)).count();

        graph.remove_vertex(&victim).unwrap();
        check_invariants(&graph);
        prop_assert!(!graph.contains_vertex(&victim));
        prop_assert_eq!(graph.vertex_count(), usize::from(vertices) - 1);
        prop_assert_eq!(graph.edge_count(), survivors);
        prop_assert!(graph.edges().all(|edge| !edge.contains(&victim)));
    }

    #[test]
    fn directed_indegrees_sum_to_total_weight(
        vertices in 1u8..8,
        raw_edges in prop::collection::vec((prop::collection::vec(any::<u8>(), 1..4), 0u8..5), 0..10),
    ) {
        let graph = build(vertices, &raw_edges, true);
        let total: f64 = graph.weights().values().sum();
        let indegrees: f64 = graph.indegrees(true).values().sum();
        prop_assert!((total - indegrees).abs() < 1e-9);
        prop_assert_eq!(canonical_fingerprint(&graph), canonical_fingerprint(&graph.clone()));
    }
}
