use hyperorient_graph::Hypergraph;
use serde::{Deserialize, Serialize};

/// Orientation algorithm that produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Exact augmenting-path search on unweighted indegrees.
    AugmentingPath,
    /// Greedy start followed by reassignment and interchange local search.
    LocalSearch,
}

impl Algorithm {
    /// Stable label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::AugmentingPath => "augmenting-path",
            Algorithm::LocalSearch => "local-search",
        }
    }
}

/// Kind of transition applied to an orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Every edge along an augmenting path moved one step forward.
    PathReversal,
    /// One edge moved off the most loaded vertex (NR).
    Reassignment,
    /// Two edges exchanged heads between a pair of vertices (NI).
    Interchange,
}

impl MoveKind {
    /// Stable label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::PathReversal => "path-reversal",
            MoveKind::Reassignment => "reassignment",
            MoveKind::Interchange => "interchange",
        }
    }
}

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// No improving transition exists.
    Converged,
    /// The step budget ran out first.
    StepBudget,
    /// The wall-clock budget ran out first.
    TimeBudget,
}

/// Summary of one orientation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Seed of the injected RNG, when the algorithm is randomized.
    pub seed: Option<u64>,
    /// Augmenting paths reversed.
    pub path_reversals: usize,
    /// Accepted single-edge reassignments.
    pub reassignments: usize,
    /// Accepted pairwise interchanges.
    pub interchanges: usize,
    /// Reassignment/interchange rounds started (local search only).
    pub rounds: usize,
    /// Maximum load of the starting orientation.
    pub initial_max_load: f64,
    /// Maximum load of the returned orientation.
    pub final_max_load: f64,
    /// Stop reason.
    pub termination: Termination,
}

impl SolveReport {
    pub(crate) fn new(algorithm: Algorithm, initial_max_load: f64) -> Self {
        Self {
            algorithm,
            seed: None,
            path_reversals: 0,
            reassignments: 0,
            interchanges: 0,
            rounds: 0,
            initial_max_load,
            final_max_load: initial_max_load,
            termination: Termination::Converged,
        }
    }

    pub(crate) fn record(&mut self, kind: MoveKind) {
        match kind {
            MoveKind::PathReversal => self.path_reversals += 1,
            MoveKind::Reassignment => self.reassignments += 1,
            MoveKind::Interchange => self.interchanges += 1,
        }
    }

    /// Number of transitions of the given kind.
    pub fn moves(&self, kind: MoveKind) -> usize {
        match kind {
            MoveKind::PathReversal => self.path_reversals,
            MoveKind::Reassignment => self.reassignments,
            MoveKind::Interchange => self.interchanges,
        }
    }

    /// Transitions of every kind.
    pub fn total_moves(&self) -> usize {
        self.path_reversals + self.reassignments + self.interchanges
    }

    /// Whether the search stopped at a local optimum rather than a budget.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Orientation together with the report of the run that produced it.
#[derive(Debug, Clone)]
pub struct Solved<V> {
    /// Directed hypergraph over the input's vertices.
    pub orientation: Hypergraph<V>,
    /// Run summary.
    pub report: SolveReport,
}
