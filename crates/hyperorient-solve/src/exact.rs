//! Minimum maximum indegree orientation of unweighted hypergraphs.
//!
//! Adapted from the outdegree algorithm of Asahiro, Miyano, Ono and Zenmyo,
//! "Graph Orientation Algorithms to Minimize the Maximum Outdegree" (2007).
//! Starting from a random orientation, the most loaded vertex repeatedly
//! hands one edge down an augmenting path that ends at a vertex at least two
//! below it. When no such path exists the vertices reachable from the
//! maximum form a set whose internal edges force the current maximum on any
//! orientation, so the result is optimal.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use hyperorient_core::errors::OrientError;
use hyperorient_core::rng::RngHandle;
use hyperorient_graph::{Edge, Hypergraph, Vertex};
use tracing::{debug, info, warn};

use crate::config::SolveConfig;
use crate::report::{Algorithm, MoveKind, SolveReport, Solved, Termination};
use crate::state::{Budget, OrientationState, Weighting};

/// One step of an augmenting path: re-head `slot` at `vertex`.
type PathStep<V> = (usize, V);

/// Orients every edge of `graph` so the largest unweighted indegree is as
/// small as possible.
///
/// Heads of a directed input are ignored, so a directed input holding two
/// edges over the same members is rejected (`coinciding-edges`). Edge weights
/// are carried over to the result but do not influence the search.
pub fn minimum_maximum_indegree_orientation<V: Vertex>(
    graph: &Hypergraph<V>,
    rng: &mut RngHandle,
) -> Result<Hypergraph<V>, OrientError> {
    minimum_maximum_indegree_orientation_with(graph, rng, &SolveConfig::default())
        .map(|solved| solved.orientation)
}

/// Same as [`minimum_maximum_indegree_orientation`] under an explicit budget,
/// returning the run report alongside the orientation.
pub fn minimum_maximum_indegree_orientation_with<V: Vertex>(
    graph: &Hypergraph<V>,
    rng: &mut RngHandle,
    config: &SolveConfig,
) -> Result<Solved<V>, OrientError> {
    config.validate()?;
    reject_coinciding_edges(graph)?;
    let mut state = OrientationState::new(graph.vertices(), Weighting::Unweighted);
    for (edge, weight) in graph.weights() {
        let head = random_member(edge, rng);
        state.push(edge.undirected(), *weight, head);
    }

    let mut report = SolveReport::new(Algorithm::AugmentingPath, state.max_load());
    report.seed = Some(rng.seed());
    let mut budget = Budget::start(config);

    let termination = loop {
        let Some((peak, load)) = state.max_vertex() else {
            break Termination::Converged;
        };
        let Some(path) = find_reducing_path(&state, &peak) else {
            break Termination::Converged;
        };
        if let Some(exhausted) = budget.exhausted() {
            break exhausted;
        }
        debug!(
            kind = MoveKind::PathReversal.as_str(),
            from = ?peak,
            load,
            length = path.len(),
            "reversing augmenting path"
        );
        for (slot, vertex) in path {
            state.retarget(slot, vertex);
        }
        budget.spend();
        report.record(MoveKind::PathReversal);
    };

    report.termination = termination;
    report.final_max_load = state.max_load();
    if termination != Termination::Converged {
        warn!(
            steps = budget.steps(),
            reason = ?termination,
            "orientation search stopped by budget"
        );
    }
    info!(
        algorithm = report.algorithm.as_str(),
        reversals = report.path_reversals,
        max_indegree = report.final_max_load,
        "orientation complete"
    );

    Ok(Solved {
        orientation: state.into_hypergraph()?,
        report,
    })
}

fn reject_coinciding_edges<V: Vertex>(graph: &Hypergraph<V>) -> Result<(), OrientError> {
    if !graph.is_directed() {
        return Ok(());
    }
    let mut seen = BTreeSet::new();
    for edge in graph.edges() {
        if !seen.insert(edge.undirected()) {
            return Err(OrientError::value(
                "coinciding-edges",
                "two edges span the same vertices and would collapse once re-headed",
            )
            .with_context("edge", edge)
            .with_hint("merge the edges or use the weighted orientation"));
        }
    }
    Ok(())
}

fn random_member<V: Vertex>(edge: &Edge<V>, rng: &mut RngHandle) -> V {
    let idx = rng.pick_index(edge.len()).unwrap_or(0);
    edge.members()[idx].clone()
}

/// Breadth-first search from `start` along edges headed at the frontier.
///
/// Only vertices whose load does not exceed `start`'s are crossed; the search
/// ends at the first vertex more than one below `start`. Loads are read from
/// `state` as they were when the search began.
fn find_reducing_path<V: Vertex>(
    state: &OrientationState<V>,
    start: &V,
) -> Option<Vec<PathStep<V>>> {
    let limit = state.load(start);
    let mut marked = BTreeSet::from([start.clone()]);
    let mut parents: BTreeMap<V, (usize, V)> = BTreeMap::new();
    let mut queue = VecDeque::from([start.clone()]);

    while let Some(vertex) = queue.pop_front() {
        for slot in state.headed_at(&vertex) {
            for member in state.edge(slot) {
                if marked.contains(member) {
                    continue;
                }
                let load = state.load(member);
                if load < limit - 1.0 {
                    let mut path = vec![(slot, member.clone())];
                    let mut cursor = vertex.clone();
                    while let Some((slot, previous)) = parents.get(&cursor) {
                        path.push((*slot, cursor.clone()));
                        cursor = previous.clone();
                    }
                    path.reverse();
                    return Some(path);
                }
                if load <= limit {
                    marked.insert(member.clone());
                    parents.insert(member.clone(), (slot, vertex.clone()));
                    queue.push_back(member.clone());
                }
            }
        }
    }
    None
}
