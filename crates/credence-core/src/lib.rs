#![deny(missing_docs)]
#![doc = "Core types for the credence discrete Bayesian network engine: \
variable identifiers, discrete values and domains, evidence and assignment \
maps, the shared error taxonomy, and the deterministic RNG handle."]

use serde::{Deserialize, Serialize};

pub mod assign;
pub mod errors;
pub mod rng;
pub mod schema;
pub mod value;

pub use assign::{Assignment, Evidence};
pub use errors::{CredenceError, ErrorInfo, ValidationReport};
pub use rng::{derive_substream_seed, RngHandle};
pub use schema::SchemaVersion;
pub use value::{Domain, Value};

/// Identifier for a variable within a network.
///
/// Identifiers are dense indices handed out in registration order; the
/// structure and prepared-network crates use them to index adjacency and
/// probability arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariableId(u64);

impl VariableId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}
