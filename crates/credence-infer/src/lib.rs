#![deny(missing_docs)]
#![doc = "Inference engines for the credence network model: exact \
enumeration over the full joint, a deterministic multi-chain Gibbs sampler, \
a lazy forward sampler producing complete joint assignments, and sequential \
most-probable-value imputation of missing variables."]

/// Engine trait and the closed algorithm dispatch enum.
pub mod algorithm;
/// Gibbs run parameters and their YAML round-trip.
pub mod config;
/// Substream seed derivation for chains and imputation slots.
pub mod determinism;
/// Query results: normalized distributions over a variable's domain.
pub mod distribution;
/// Exact inference by enumeration of the free variables.
pub mod exact;
/// Forward (ancestral) sampling of joint assignments.
pub mod forward;
/// Markov-chain Monte Carlo approximation of point queries.
pub mod gibbs;
/// Filling missing variables with their most probable values.
pub mod impute;

pub use algorithm::{Algorithm, InferenceAlgorithm};
pub use config::{GibbsConfig, UpdateSchedule};
pub use distribution::{Distribution, ZERO_MASS_TOLERANCE};
pub use exact::ExactEngine;
pub use forward::{sample, SampleStream};
pub use gibbs::{GibbsEngine, GibbsSummary};
pub use impute::impute;
