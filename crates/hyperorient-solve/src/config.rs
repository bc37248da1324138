use hyperorient_core::errors::OrientError;
use hyperorient_core::WEIGHT_TOLERANCE;
use serde::{Deserialize, Serialize};

/// Tunables shared by both orientation algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveConfig {
    /// Margin a local-search move must improve by to be accepted. Guards
    /// against cycling between orientations whose loads differ only by
    /// floating-point noise.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of transitions (path reversals or accepted moves).
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Optional wall-clock limit in milliseconds.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

fn default_tolerance() -> f64 {
    WEIGHT_TOLERANCE
}

fn default_max_steps() -> usize {
    1_000_000
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_steps: default_max_steps(),
            time_limit_ms: None,
        }
    }
}

impl SolveConfig {
    /// Checks that the configuration can drive a solve.
    pub fn validate(&self) -> Result<(), OrientError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(OrientError::config(
                "invalid-tolerance",
                "tolerance must be finite and non-negative",
            )
            .with_context("tolerance", self.tolerance));
        }
        if self.max_steps == 0 {
            return Err(OrientError::config(
                "invalid-step-budget",
                "step budget must allow at least one transition",
            )
            .with_hint("use a large value to approximate an unbounded search"));
        }
        Ok(())
    }
}
