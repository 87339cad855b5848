//! Gibbs sampling: Markov-chain Monte Carlo approximation of point queries.

use credence_core::errors::{CredenceError, ErrorInfo};
use credence_core::{Evidence, RngHandle, Value};
use credence_net::PreparedNetwork;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::{unknown_target, InferenceAlgorithm};
use crate::config::{GibbsConfig, UpdateSchedule};
use crate::determinism;
use crate::distribution::Distribution;

/// Gibbs engine carrying its run parameters.
#[derive(Debug, Clone, Default)]
pub struct GibbsEngine {
    config: GibbsConfig,
}

impl GibbsEngine {
    /// Creates an engine with the provided parameters.
    pub fn new(config: GibbsConfig) -> Self {
        Self { config }
    }

    /// Returns the run parameters.
    pub fn config(&self) -> &GibbsConfig {
        &self.config
    }
}

impl InferenceAlgorithm for GibbsEngine {
    fn answer(
        &self,
        net: &PreparedNetwork,
        target: &str,
        evidence: &Evidence,
    ) -> Result<Distribution, CredenceError> {
        run(&self.config, net, target, evidence).map(|summary| summary.distribution)
    }
}

/// Summary returned to callers after a sampling run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GibbsSummary {
    /// Empirical distribution of the target variable.
    pub distribution: Distribution,
    /// Tally per target value in domain order, merged across chains.
    pub counts: Vec<(Value, u64)>,
    /// Number of independent chains run.
    pub chains: usize,
    /// Counted (post burn-in) steps per chain.
    pub steps_per_chain: u64,
    /// Derived seed of each chain.
    pub chain_seeds: Vec<u64>,
}

/// State tracked per chain.
struct ChainState {
    state: Vec<usize>,
    rng: RngHandle,
    cursor: usize,
}

impl ChainState {
    /// Fixes evidence slots and draws every free variable uniformly from its
    /// domain using the chain's own substream.
    fn init(net: &PreparedNetwork, fixed: &[Option<usize>], seed: u64) -> Self {
        let mut rng = RngHandle::from_seed(seed);
        let state = fixed
            .iter()
            .enumerate()
            .map(|(variable, slot)| match slot {
                Some(value) => *value,
                None => draw_uniform(net.domain(variable).len(), &mut rng),
            })
            .collect();
        Self {
            state,
            rng,
            cursor: 0,
        }
    }
}

/// Runs the sampler and returns the merged summary.
///
/// Each chain starts from its own derived substream seed, walks
/// `burn_in + iterations` single-variable updates, and tallies the target's
/// value after every post-burn-in step. Tallies merge across chains by
/// summation. Runs with the same configuration are identical.
pub fn run(
    config: &GibbsConfig,
    net: &PreparedNetwork,
    target: &str,
    evidence: &Evidence,
) -> Result<GibbsSummary, CredenceError> {
    if config.iterations == 0 {
        return Err(CredenceError::InvalidArgument(
            ErrorInfo::new("zero-iterations", "gibbs sampling requires at least one iteration")
                .with_context("iterations", "0"),
        ));
    }
    if config.chains == 0 {
        return Err(CredenceError::InvalidArgument(
            ErrorInfo::new("zero-chains", "gibbs sampling requires at least one chain")
                .with_context("chains", "0"),
        ));
    }
    let target_index = net
        .variable_index(target)
        .ok_or_else(|| unknown_target(target))?;
    let fixed = net.compile_evidence(evidence)?;

    // the round-robin schedule walks the free variables in topological order
    let free: Vec<usize> = net
        .topological_order()
        .iter()
        .copied()
        .filter(|variable| fixed[*variable].is_none())
        .collect();
    let max_width = (0..net.variable_count())
        .map(|variable| net.domain(variable).len())
        .max()
        .unwrap_or(1);

    let chain_seeds: Vec<u64> = (0..config.chains)
        .map(|chain| determinism::chain_seed(config.seed, chain))
        .collect();
    debug!(
        "gibbs query for {target}: {} chain(s), {} free variable(s), {} + {} steps",
        config.chains,
        free.len(),
        config.burn_in,
        config.iterations
    );

    let mut counts = vec![0u64; net.domain(target_index).len()];
    let mut buffer = vec![0.0; max_width];
    for &seed in &chain_seeds {
        let mut chain = ChainState::init(net, &fixed, seed);
        for step in 0..config.burn_in + config.iterations {
            advance(net, &free, config.schedule, &mut chain, &mut buffer);
            if step >= config.burn_in {
                counts[chain.state[target_index]] += 1;
            }
        }
    }

    let weights: Vec<f64> = counts.iter().map(|count| *count as f64).collect();
    let distribution = Distribution::from_weights(net.domain(target_index), &weights)?;
    Ok(GibbsSummary {
        distribution,
        counts: net
            .domain(target_index)
            .values()
            .cloned()
            .zip(counts)
            .collect(),
        chains: config.chains,
        steps_per_chain: config.iterations,
        chain_seeds,
    })
}

/// Performs one scheduled single-variable update.
fn advance(
    net: &PreparedNetwork,
    free: &[usize],
    schedule: UpdateSchedule,
    chain: &mut ChainState,
    buffer: &mut [f64],
) {
    if free.is_empty() {
        // fully observed network: the walk has nothing to resample
        return;
    }
    let variable = match schedule {
        UpdateSchedule::RoundRobin => {
            let variable = free[chain.cursor];
            chain.cursor = (chain.cursor + 1) % free.len();
            variable
        }
        UpdateSchedule::Random => free[draw_uniform(free.len(), &mut chain.rng)],
    };
    resample(net, variable, chain, buffer);
}

/// Draws a fresh value for `variable` from its local conditional: the
/// product of its own row and every child's row at the current assignment
/// of its Markov blanket, all other variables held fixed.
fn resample(net: &PreparedNetwork, variable: usize, chain: &mut ChainState, buffer: &mut [f64]) {
    let width = net.domain(variable).len();
    let current = chain.state[variable];
    let own_row = net.conditional_row(variable, &chain.state);

    for value in 0..width {
        let mut weight = own_row[value];
        if weight > 0.0 {
            chain.state[variable] = value;
            for &child in net.children(variable) {
                weight *= net.conditional_probability(child, &chain.state, chain.state[child]);
                if weight == 0.0 {
                    break;
                }
            }
        }
        buffer[value] = weight;
    }

    let total: f64 = buffer[..width].iter().sum();
    if total <= 0.0 {
        // transiently contradictory neighborhood: keep the current value and
        // let neighboring updates move the chain out
        chain.state[variable] = current;
        debug!(
            "gibbs local conditional vanished at {}; keeping current value",
            net.variable_name(variable)
        );
        return;
    }

    let mut draw = chain.rng.unit_f64() * total;
    for value in 0..width {
        draw -= buffer[value];
        if draw < 0.0 {
            chain.state[variable] = value;
            return;
        }
    }
    chain.state[variable] = width - 1;
}

fn draw_uniform(width: usize, rng: &mut RngHandle) -> usize {
    ((rng.unit_f64() * width as f64) as usize).min(width - 1)
}
