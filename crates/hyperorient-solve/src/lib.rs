#![deny(missing_docs)]

//! Orientation algorithms for hypergraphs: give every edge a head so the
//! largest load any vertex receives is small.
//!
//! [`minimum_maximum_indegree_orientation`] is exact for unweighted
//! indegrees. [`minimum_maximum_weighted_indegree_orientation`] is a local
//! search for the weighted case. Both have `_with` variants taking a
//! [`SolveConfig`] budget and returning a [`SolveReport`].

/// Search budget and acceptance tolerance.
pub mod config;
pub mod exact;
/// Run summaries returned by the budgeted entry points.
pub mod report;
mod state;
pub mod weighted;

pub use config::SolveConfig;
pub use exact::{minimum_maximum_indegree_orientation, minimum_maximum_indegree_orientation_with};
pub use report::{Algorithm, MoveKind, SolveReport, Solved, Termination};
pub use weighted::{
    minimum_maximum_weighted_indegree_orientation,
    minimum_maximum_weighted_indegree_orientation_with,
};
