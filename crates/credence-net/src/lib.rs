#![deny(missing_docs)]
#![doc = "Network model for the credence engine: the directed acyclic \
structure over named variables, caller-authored conditional probability \
tables, the validation and preparation pipeline producing an immutable \
query-ready network, lossless definition serialization, and canonical \
hashing."]

/// Canonical SHA-256 hashing of prepared networks.
pub mod hash;
/// Validation rule set and compilation into [`PreparedNetwork`].
pub mod prepare;
/// Lossless JSON and binary serialization of network definitions.
pub mod serialization;
/// Mutable DAG of named variables with acyclicity enforcement.
pub mod structure;
/// Raw conditional probability tables and their store.
pub mod table;

pub use hash::canonical_hash;
pub use prepare::{prepare, validate, PreparedNetwork, ROW_SUM_TOLERANCE};
pub use serialization::NetworkDefinition;
pub use structure::NetworkStructure;
pub use table::{ConditionalTable, TableRow, TableStore};
