//! Local-search approximation of the minimum maximum weighted indegree
//! orientation.
//!
//! Adapted from Piersma and Van Dijk, "A Local Search Heuristic for
//! Unrelated Parallel Machine Scheduling with Efficient Neighborhood Search"
//! (1996): edges are jobs, vertices are the machines each job may run on.
//! A greedy start is improved with two neighborhoods:
//!
//! * **reassignment** (NR): move one edge off the most loaded vertex;
//! * **interchange** (NI): swap the heads of two edges between a pair of
//!   vertices that both edges touch.
//!
//! Both scans take the first improving move. Rounds of NR followed by NI
//! repeat until an NI pass finds nothing, so the result is a local optimum of
//! both neighborhoods. No global optimality is claimed.

use hyperorient_core::errors::OrientError;
use hyperorient_graph::{Hypergraph, Vertex};
use tracing::{debug, info, warn};

use crate::config::SolveConfig;
use crate::report::{Algorithm, MoveKind, SolveReport, Solved, Termination};
use crate::state::{Budget, OrientationState, Weighting};

/// Move one edge to another of its members.
#[derive(Debug, Clone, PartialEq)]
struct Reassignment<V> {
    slot: usize,
    to: V,
}

/// Swap heads: `high_slot` moves to `low`, `low_slot` moves to `high`.
#[derive(Debug, Clone, PartialEq)]
struct Interchange<V> {
    high: V,
    low: V,
    high_slot: usize,
    low_slot: usize,
}

/// Approximates an orientation minimizing the largest weighted indegree.
///
/// An undirected input starts from the greedy orientation; a directed input
/// is used as the starting orientation as-is, so feeding a result back in
/// performs no moves.
pub fn minimum_maximum_weighted_indegree_orientation<V: Vertex>(
    graph: &Hypergraph<V>,
) -> Result<Hypergraph<V>, OrientError> {
    minimum_maximum_weighted_indegree_orientation_with(graph, &SolveConfig::default())
        .map(|solved| solved.orientation)
}

/// Same as [`minimum_maximum_weighted_indegree_orientation`] under an
/// explicit configuration, returning the run report alongside the
/// orientation.
pub fn minimum_maximum_weighted_indegree_orientation_with<V: Vertex>(
    graph: &Hypergraph<V>,
    config: &SolveConfig,
) -> Result<Solved<V>, OrientError> {
    config.validate()?;
    let mut state = initial_orientation(graph);
    let mut report = SolveReport::new(Algorithm::LocalSearch, state.max_load());
    let mut budget = Budget::start(config);
    let tolerance = config.tolerance;

    let termination = 'rounds: loop {
        report.rounds += 1;

        while let Some(Reassignment { slot, to }) = find_reassignment(&state, tolerance) {
            if let Some(exhausted) = budget.exhausted() {
                break 'rounds exhausted;
            }
            debug!(
                kind = MoveKind::Reassignment.as_str(),
                from = ?state.head(slot),
                to = ?to,
                weight = state.amount_of(slot),
                "accepted move"
            );
            state.retarget(slot, to);
            budget.spend();
            report.record(MoveKind::Reassignment);
        }

        let mut swapped = false;
        while let Some(swap) = find_interchange(&state, tolerance) {
            if let Some(exhausted) = budget.exhausted() {
                break 'rounds exhausted;
            }
            debug!(
                kind = MoveKind::Interchange.as_str(),
                high = ?swap.high,
                low = ?swap.low,
                "accepted move"
            );
            state.retarget(swap.high_slot, swap.low);
            state.retarget(swap.low_slot, swap.high);
            budget.spend();
            report.record(MoveKind::Interchange);
            swapped = true;
        }

        if !swapped {
            break Termination::Converged;
        }
    };

    report.termination = termination;
    report.final_max_load = state.max_load();
    if termination != Termination::Converged {
        warn!(
            steps = budget.steps(),
            reason = ?termination,
            "local search stopped by budget"
        );
    }
    info!(
        algorithm = report.algorithm.as_str(),
        reassignments = report.reassignments,
        interchanges = report.interchanges,
        rounds = report.rounds,
        max_load = report.final_max_load,
        "orientation complete"
    );

    Ok(Solved {
        orientation: state.into_hypergraph()?,
        report,
    })
}

fn initial_orientation<V: Vertex>(graph: &Hypergraph<V>) -> OrientationState<V> {
    let mut state = OrientationState::new(graph.vertices(), Weighting::Weighted);
    for (edge, weight) in graph.weights() {
        let head = match edge.head() {
            Some(head) => head.clone(),
            None => state.least_loaded_member(edge),
        };
        state.push(edge.undirected(), *weight, head);
    }
    state
}

/// First edge headed at the most loaded vertex that fits strictly under the
/// current peak elsewhere.
fn find_reassignment<V: Vertex>(
    state: &OrientationState<V>,
    tolerance: f64,
) -> Option<Reassignment<V>> {
    let (peak, peak_load) = state.max_vertex()?;
    for slot in state.headed_at(&peak) {
        let weight = state.amount_of(slot);
        for vertex in state.edge(slot).iter().filter(|vertex| **vertex != peak) {
            if state.load(vertex) + tolerance < peak_load - weight {
                return Some(Reassignment {
                    slot,
                    to: vertex.clone(),
                });
            }
        }
    }
    None
}

/// First head swap between a heavier and a lighter vertex that lowers the
/// larger of their two loads.
fn find_interchange<V: Vertex>(
    state: &OrientationState<V>,
    tolerance: f64,
) -> Option<Interchange<V>> {
    let order = state.vertices_by_load();
    for (rank, high) in order.iter().enumerate().rev() {
        let high_load = state.load(high);
        for low in &order[..rank] {
            let low_load = state.load(low);
            let current = high_load.max(low_load);
            for high_slot in state.headed_at(high) {
                if !state.edge(high_slot).contains(low) {
                    continue;
                }
                let high_weight = state.amount_of(high_slot);
                for low_slot in state.headed_at(low) {
                    if !state.edge(low_slot).contains(high) {
                        continue;
                    }
                    let low_weight = state.amount_of(low_slot);
                    let swapped = (high_load - high_weight + low_weight)
                        .max(low_load - low_weight + high_weight);
                    if swapped + tolerance < current {
                        return Some(Interchange {
                            high: high.clone(),
                            low: low.clone(),
                            high_slot,
                            low_slot,
                        });
                    }
                }
            }
        }
    }
    None
}
