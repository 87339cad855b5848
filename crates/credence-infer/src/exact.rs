//! Exact inference by full-joint enumeration.

use credence_core::errors::CredenceError;
use credence_core::Evidence;
use credence_net::PreparedNetwork;
use log::debug;

use crate::algorithm::{unknown_target, InferenceAlgorithm};
use crate::distribution::Distribution;

/// Exact engine: enumerates every assignment of the non-evidence variables.
///
/// Cost is exponential in the number of free variables; acceptable for the
/// small networks this engine targets, with the Gibbs sampler as the
/// scalable fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactEngine;

impl InferenceAlgorithm for ExactEngine {
    fn answer(
        &self,
        net: &PreparedNetwork,
        target: &str,
        evidence: &Evidence,
    ) -> Result<Distribution, CredenceError> {
        query(net, target, evidence)
    }
}

/// Computes the posterior of `target` given `evidence` by marginalizing the
/// full joint.
///
/// Every assignment extending the evidence contributes its joint probability
/// to the weight of the target value it carries; the weights then normalize
/// to the posterior. Impossible evidence surfaces as
/// `ZeroEvidenceProbability`. A target fixed by the evidence is allowed: all
/// mass lands on the evidenced value and the result is that point mass.
pub fn query(
    net: &PreparedNetwork,
    target: &str,
    evidence: &Evidence,
) -> Result<Distribution, CredenceError> {
    let target_index = net
        .variable_index(target)
        .ok_or_else(|| unknown_target(target))?;
    let fixed = net.compile_evidence(evidence)?;

    let mut state: Vec<usize> = fixed.iter().map(|slot| slot.unwrap_or(0)).collect();
    let free: Vec<usize> = (0..net.variable_count())
        .filter(|variable| fixed[*variable].is_none())
        .collect();
    debug!(
        "exact query for {target}: enumerating over {} free variable(s)",
        free.len()
    );

    let mut weights = vec![0.0; net.domain(target_index).len()];
    // odometer over the free variables' domains; evidence slots never move
    loop {
        weights[state[target_index]] += net.joint_weight(&state);

        let mut slot = free.len();
        while slot > 0 {
            let variable = free[slot - 1];
            state[variable] += 1;
            if state[variable] < net.domain(variable).len() {
                break;
            }
            state[variable] = 0;
            slot -= 1;
        }
        if slot == 0 {
            break;
        }
    }

    Distribution::from_weights(net.domain(target_index), &weights)
}
