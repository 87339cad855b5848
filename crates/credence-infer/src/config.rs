//! YAML-configurable parameters governing the Gibbs sampler.

use credence_core::errors::{CredenceError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Parameters for a Gibbs sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GibbsConfig {
    /// Counted steps per chain after burn-in; each step resamples one
    /// variable and tallies the target's current value.
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Steps discarded at the start of every chain before counting begins.
    #[serde(default = "default_burn_in")]
    pub burn_in: u64,
    /// Number of independent chains; their counts merge by summation.
    #[serde(default = "default_chains")]
    pub chains: usize,
    /// Master seed; each chain draws from its own derived substream.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Order in which free variables are resampled.
    #[serde(default)]
    pub schedule: UpdateSchedule,
}

fn default_iterations() -> u64 {
    10_000
}

fn default_burn_in() -> u64 {
    1_000
}

fn default_chains() -> usize {
    2
}

fn default_seed() -> u64 {
    0xD15C_2E7E_5EED_u64
}

impl Default for GibbsConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            burn_in: default_burn_in(),
            chains: default_chains(),
            seed: default_seed(),
            schedule: UpdateSchedule::default(),
        }
    }
}

impl GibbsConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, CredenceError> {
        serde_yaml::from_str(yaml).map_err(|err| {
            CredenceError::Serde(ErrorInfo::new("deserialize-yaml", err.to_string()))
        })
    }

    /// Serializes the configuration to YAML text.
    pub fn to_yaml(&self) -> Result<String, CredenceError> {
        serde_yaml::to_string(self)
            .map_err(|err| CredenceError::Serde(ErrorInfo::new("serialize-yaml", err.to_string())))
    }
}

/// Supported variable-update schedules.
///
/// Both are deterministic given the chain seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UpdateSchedule {
    /// Cycle through the free variables in topological order.
    RoundRobin,
    /// Pick a free variable uniformly at random each step.
    Random,
}

impl Default for UpdateSchedule {
    fn default() -> Self {
        UpdateSchedule::RoundRobin
    }
}
