use std::collections::BTreeSet;

use hyperorient_core::rng::RngHandle;
use hyperorient_core::OrientError;
use hyperorient_graph::{Edge, Hypergraph};
use hyperorient_solve::{
    minimum_maximum_indegree_orientation, minimum_maximum_indegree_orientation_with, MoveKind,
    SolveConfig, Termination,
};
use proptest::prelude::*;

fn undirected<V: hyperorient_graph::Vertex>(vertices: &[V], edges: &[Vec<V>]) -> Hypergraph<V> {
    let mut graph = Hypergraph::new(false);
    for v in vertices {
        graph.add_vertex(v.clone());
    }
    for members in edges {
        graph
            .add_edge(Edge::new(members.iter().cloned()).unwrap(), 1.0)
            .unwrap();
    }
    graph
}

fn star(leaves: u32) -> Hypergraph<u32> {
    let vertices: Vec<u32> = (0..=leaves).collect();
    let edges: Vec<Vec<u32>> = (1..=leaves).map(|leaf| vec![0, leaf]).collect();
    undirected(&vertices, &edges)
}

fn assert_orients<V: hyperorient_graph::Vertex>(input: &Hypergraph<V>, output: &Hypergraph<V>) {
    assert!(output.is_directed());
    assert_eq!(output.vertices(), input.vertices());
    let stripped: BTreeSet<Edge<V>> = output.edges().map(|edge| edge.undirected()).collect();
    let original: BTreeSet<Edge<V>> = input.edges().map(|edge| edge.undirected()).collect();
    assert_eq!(stripped, original);
}

fn brute_force_optimum(edges: &[Vec<u8>], loads: &mut Vec<u32>) -> u32 {
    match edges.split_first() {
        None => loads.iter().copied().max().unwrap_or(0),
        Some((edge, rest)) => edge
            .iter()
            .map(|&head| {
                loads[head as usize] += 1;
                let best = brute_force_optimum(rest, loads);
                loads[head as usize] -= 1;
                best
            })
            .min()
            .unwrap_or(0),
    }
}

#[test]
fn four_cycle_reaches_one() {
    let graph = undirected(
        &['a', 'b', 'c', 'd'],
        &[
            vec!['a', 'b'],
            vec!['b', 'c'],
            vec!['c', 'd'],
            vec!['d', 'a'],
        ],
    );
    for seed in 0..16 {
        let mut rng = RngHandle::from_seed(seed);
        let oriented = minimum_maximum_indegree_orientation(&graph, &mut rng).unwrap();
        assert_orients(&graph, &oriented);
        assert_eq!(oriented.max_indegree(false), 1.0, "seed {seed}");
    }
}

#[test]
fn star_reaches_one_from_any_start() {
    let graph = star(5);
    for seed in 0..32 {
        let mut rng = RngHandle::from_seed(seed);
        let solved =
            minimum_maximum_indegree_orientation_with(&graph, &mut rng, &SolveConfig::default())
                .unwrap();
        assert_orients(&graph, &solved.orientation);
        assert_eq!(solved.orientation.max_indegree(false), 1.0);
        assert!(solved.report.converged());
        assert_eq!(solved.report.final_max_load, 1.0);
        assert!(solved.report.initial_max_load >= solved.report.final_max_load);
        assert_eq!(
            solved.report.moves(MoveKind::PathReversal),
            solved.report.total_moves()
        );
    }
}

#[test]
fn substreams_agree_on_value() {
    let graph = undirected(
        &[0u8, 1, 2, 3, 4, 5],
        &[
            vec![0, 1, 2],
            vec![0, 1],
            vec![0, 2],
            vec![0],
            vec![1, 2],
            vec![2, 3, 4],
            vec![3, 4],
            vec![4, 5],
            vec![3],
        ],
    );
    let values: BTreeSet<u64> = (0..12)
        .map(|substream| {
            let mut rng = RngHandle::for_substream(0x5eed, substream);
            let oriented = minimum_maximum_indegree_orientation(&graph, &mut rng).unwrap();
            assert_orients(&graph, &oriented);
            oriented.max_indegree(false) as u64
        })
        .collect();
    assert_eq!(values.len(), 1);
}

#[test]
fn weights_are_carried_over() {
    let mut graph = Hypergraph::new(false);
    for v in ['x', 'y', 'z'] {
        graph.add_vertex(v);
    }
    graph.add_edge(Edge::new(['x', 'y']).unwrap(), 2.5).unwrap();
    graph.add_edge(Edge::new(['y', 'z']).unwrap(), 0.25).unwrap();
    let mut rng = RngHandle::from_seed(11);
    let oriented = minimum_maximum_indegree_orientation(&graph, &mut rng).unwrap();
    for (edge, weight) in oriented.weights() {
        assert_eq!(*weight, graph.weight(&edge.undirected()).unwrap());
    }
}

#[test]
fn directed_input_heads_are_ignored() {
    let mut graph = Hypergraph::new(true);
    for v in 0..4u8 {
        graph.add_vertex(v);
    }
    for leaf in 1..4u8 {
        graph
            .add_edge(Edge::with_head([0, leaf], 0).unwrap(), 1.0)
            .unwrap();
    }
    let mut rng = RngHandle::from_seed(2);
    let oriented = minimum_maximum_indegree_orientation(&graph, &mut rng).unwrap();
    assert_eq!(oriented.max_indegree(false), 1.0);
    assert_eq!(oriented.edge_count(), 3);
}

#[test]
fn directed_edges_over_same_members_are_rejected() {
    let mut graph = Hypergraph::new(true);
    graph.add_vertex('a');
    graph.add_vertex('b');
    graph
        .add_edge(Edge::with_head(['a', 'b'], 'a').unwrap(), 1.0)
        .unwrap();
    graph
        .add_edge(Edge::with_head(['a', 'b'], 'b').unwrap(), 1.0)
        .unwrap();
    graph.add_edge(Edge::with_head(['a'], 'a').unwrap(), 1.0).unwrap();

    for seed in 0..8 {
        let mut rng = RngHandle::from_seed(seed);
        let err = minimum_maximum_indegree_orientation(&graph, &mut rng).unwrap_err();
        match err {
            OrientError::Value(info) => {
                assert_eq!(info.code, "coinciding-edges");
                assert_eq!(
                    info.context.get("edge").map(String::as_str),
                    Some("{'a', 'b'} -> 'b'")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn report_matches_returned_orientation() {
    let mut graph = Hypergraph::new(true);
    for v in 0..4u8 {
        graph.add_vertex(v);
    }
    graph.add_edge(Edge::with_head([0, 1], 0).unwrap(), 1.0).unwrap();
    graph.add_edge(Edge::with_head([0, 2], 0).unwrap(), 1.0).unwrap();
    graph.add_edge(Edge::with_head([0], 0).unwrap(), 1.0).unwrap();
    graph.add_edge(Edge::with_head([1, 2, 3], 3).unwrap(), 1.0).unwrap();
    for seed in 0..8 {
        let mut rng = RngHandle::from_seed(seed);
        let solved =
            minimum_maximum_indegree_orientation_with(&graph, &mut rng, &SolveConfig::default())
                .unwrap();
        assert_eq!(solved.orientation.edge_count(), graph.edge_count());
        assert_eq!(
            solved.orientation.max_indegree(false),
            solved.report.final_max_load
        );
    }
}

#[test]
fn empty_graph_converges_immediately() {
    let graph: Hypergraph<u8> = undirected(&[1, 2], &[]);
    let mut rng = RngHandle::from_seed(0);
    let solved =
        minimum_maximum_indegree_orientation_with(&graph, &mut rng, &SolveConfig::default())
            .unwrap();
    assert_eq!(solved.orientation.vertex_count(), 2);
    assert_eq!(solved.orientation.edge_count(), 0);
    assert_eq!(solved.report.total_moves(), 0);
    assert_eq!(solved.report.final_max_load, 0.0);
}

#[test]
fn step_budget_stops_after_one_reversal() {
    let graph = star(40);
    let config = SolveConfig {
        max_steps: 1,
        ..SolveConfig::default()
    };
    let mut rng = RngHandle::from_seed(9);
    let solved = minimum_maximum_indegree_orientation_with(&graph, &mut rng, &config).unwrap();
    assert_eq!(solved.report.termination, Termination::StepBudget);
    assert_eq!(solved.report.path_reversals, 1);
    assert!(solved.report.final_max_load <= solved.report.initial_max_load);
    assert_orients(&graph, &solved.orientation);
}

#[test]
fn time_budget_returns_the_start() {
    let graph = star(40);
    let config = SolveConfig {
        time_limit_ms: Some(0),
        ..SolveConfig::default()
    };
    let mut rng = RngHandle::from_seed(9);
    let solved = minimum_maximum_indegree_orientation_with(&graph, &mut rng, &config).unwrap();
    assert_eq!(solved.report.termination, Termination::TimeBudget);
    assert_eq!(solved.report.total_moves(), 0);
    assert_eq!(
        solved.report.final_max_load,
        solved.report.initial_max_load
    );
    assert_orients(&graph, &solved.orientation);
}

#[test]
fn invalid_config_is_rejected() {
    let config = SolveConfig {
        max_steps: 0,
        ..SolveConfig::default()
    };
    let mut rng = RngHandle::from_seed(0);
    let err = minimum_maximum_indegree_orientation_with(&star(2), &mut rng, &config).unwrap_err();
    assert!(matches!(err, OrientError::Config(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_brute_force_optimum(
        vertices in 1u8..=6,
        raw_edges in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..4), 0..=7),
        seed in any::<u64>(),
    ) {
        let vertex_list: Vec<u8> = (0..vertices).collect();
        let members: Vec<Vec<u8>> = raw_edges
            .iter()
            .map(|raw| raw.iter().map(|m| m % vertices).collect::<BTreeSet<u8>>().into_iter().collect())
            .collect();
        let graph = undirected(&vertex_list, &members);

        let distinct: Vec<Vec<u8>> = graph.edges().map(|edge| edge.members().to_vec()).collect();
        let mut loads = vec![0u32; vertices as usize];
        let optimum = brute_force_optimum(&distinct, &mut loads);

        let mut rng = RngHandle::from_seed(seed);
        let oriented = minimum_maximum_indegree_orientation(&graph, &mut rng).unwrap();
        assert_orients(&graph, &oriented);
        prop_assert_eq!(oriented.max_indegree(false), f64::from(optimum));
    }
}
