//! Closed dispatch across the inference engines.

use credence_core::errors::{CredenceError, ErrorInfo};
use credence_core::Evidence;
use credence_net::PreparedNetwork;
use serde::{Deserialize, Serialize};

use crate::config::GibbsConfig;
use crate::distribution::Distribution;
use crate::{exact, gibbs};

/// Capability shared by every inference engine: answer a point query.
pub trait InferenceAlgorithm {
    /// Computes the distribution of `target` given `evidence`.
    fn answer(
        &self,
        net: &PreparedNetwork,
        target: &str,
        evidence: &Evidence,
    ) -> Result<Distribution, CredenceError>;
}

/// Closed set of query algorithms.
///
/// Callers pick a variant instead of passing a string flag; the enum
/// delegates to the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Algorithm {
    /// Full-joint enumeration.
    Exact,
    /// Markov-chain approximation with the given parameters.
    Gibbs(GibbsConfig),
}

impl InferenceAlgorithm for Algorithm {
    fn answer(
        &self,
        net: &PreparedNetwork,
        target: &str,
        evidence: &Evidence,
    ) -> Result<Distribution, CredenceError> {
        match self {
            Algorithm::Exact => exact::query(net, target, evidence),
            Algorithm::Gibbs(config) => {
                gibbs::run(config, net, target, evidence).map(|summary| summary.distribution)
            }
        }
    }
}

pub(crate) fn unknown_target(target: &str) -> CredenceError {
    CredenceError::UnknownVariable(
        ErrorInfo::new("unknown-variable", "query target is not a network variable")
            .with_context("variable", target),
    )
}
