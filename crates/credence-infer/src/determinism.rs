//! Deterministic seed derivation for sampler substreams.

use credence_core::derive_substream_seed;

/// Derives the deterministic seed used for a specific Gibbs chain.
pub fn chain_seed(master_seed: u64, chain_index: usize) -> u64 {
    derive_substream_seed(master_seed, chain_index as u64)
}

/// Derives the deterministic seed for the query filling one imputed slot.
///
/// Sequential imputation runs one sampler per missing variable; giving each
/// its own substream keeps those runs independent while the whole fill stays
/// reproducible from the master seed.
pub fn impute_seed(master_seed: u64, slot: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0x5A5A_5A5A_5A5A_5A5A, slot as u64)
}
