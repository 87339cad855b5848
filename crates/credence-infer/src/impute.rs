//! Sequential most-probable-value imputation of missing variables.

use credence_core::errors::{CredenceError, ErrorInfo};
use credence_core::{Assignment, Evidence};
use credence_net::PreparedNetwork;
use log::debug;

use crate::algorithm::Algorithm;
use crate::determinism;
use crate::{exact, gibbs};

/// Fills every missing variable with its most probable value.
///
/// Walks the topological order; each missing variable is queried against the
/// original evidence plus the values imputed so far, and its `argmax` (ties
/// breaking toward the earlier domain value) joins the working evidence
/// before the next slot is filled. Observed variables pass through
/// unchanged. With the Gibbs algorithm every slot runs on its own substream
/// derived from the configured seed, so a fill is reproducible end to end.
pub fn impute(
    net: &PreparedNetwork,
    evidence: &Evidence,
    algorithm: &Algorithm,
) -> Result<Assignment, CredenceError> {
    // surface invalid evidence before any slot is sampled
    net.compile_evidence(evidence)?;

    let mut working = evidence.clone();
    let mut assignment = Assignment::new();
    for &variable in net.topological_order() {
        let name = net.variable_name(variable);
        if let Some(value) = working.get(name) {
            assignment.set(name, value.clone());
            continue;
        }
        let posterior = match algorithm {
            Algorithm::Exact => exact::query(net, name, &working)?,
            Algorithm::Gibbs(config) => {
                let mut slot_config = config.clone();
                slot_config.seed = determinism::impute_seed(config.seed, variable);
                gibbs::run(&slot_config, net, name, &working)?.distribution
            }
        };
        let value = posterior.argmax().cloned().ok_or_else(|| {
            CredenceError::ZeroEvidenceProbability(
                ErrorInfo::new("empty-posterior", "imputation query returned no support")
                    .with_context("variable", name),
            )
        })?;
        debug!("imputed {name} = {value}");
        working.set(name, value.clone());
        assignment.set(name, value);
    }
    Ok(assignment)
}
