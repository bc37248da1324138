#![deny(missing_docs)]
#![doc = "Shared error taxonomy and deterministic randomness for the hyperorient crates."]

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, OrientError};
pub use rng::{derive_substream_seed, RngHandle};

/// Tolerance used when comparing weights and loads that went through
/// floating-point arithmetic.
pub const WEIGHT_TOLERANCE: f64 = 1e-4;
