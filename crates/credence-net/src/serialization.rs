//! Lossless serialization of network definitions.

use credence_core::errors::{CredenceError, ErrorInfo};
use credence_core::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::structure::NetworkStructure;
use crate::table::{ConditionalTable, TableStore};

/// Serializable bundle describing a network: its variables, its edges, and
/// its raw conditional tables.
///
/// A definition is the persisted form of a `(structure, store)` pair; it
/// carries everything needed to rebuild both and round-trips losslessly, so
/// re-preparing a restored definition yields a network with the same
/// canonical hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    /// Schema of this payload, carried for forward compatibility.
    pub schema_version: SchemaVersion,
    /// Every variable name, in lexical order.
    pub variables: Vec<String>,
    /// Every `(parent, child)` edge, sorted by parent then child.
    pub edges: Vec<(String, String)>,
    /// Raw tables in variable name order.
    pub tables: Vec<ConditionalTable>,
}

impl NetworkDefinition {
    /// Captures a definition from a structure and its table store.
    pub fn from_parts(structure: &NetworkStructure, store: &TableStore) -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            variables: structure.variables().map(str::to_string).collect(),
            edges: structure
                .edges()
                .into_iter()
                .map(|(parent, child)| (parent.to_string(), child.to_string()))
                .collect(),
            tables: store.tables().cloned().collect(),
        }
    }

    /// Rebuilds the structure and table store described by the definition.
    ///
    /// Edges are replayed through [`NetworkStructure::add_edge`], so a
    /// tampered payload containing a cycle or an unknown endpoint is
    /// rejected with the same errors a live builder would produce.
    pub fn into_parts(self) -> Result<(NetworkStructure, TableStore), CredenceError> {
        let mut structure = NetworkStructure::new();
        for variable in &self.variables {
            structure.add_variable(variable.clone());
        }
        for (parent, child) in &self.edges {
            structure.add_edge(parent, child)?;
        }
        let mut store = TableStore::new();
        for table in self.tables {
            store.set(table);
        }
        Ok((structure, store))
    }

    /// Serializes the definition to a JSON string.
    pub fn to_json(&self) -> Result<String, CredenceError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| CredenceError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
    }

    /// Restores a definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CredenceError> {
        serde_json::from_str(json).map_err(|err| {
            CredenceError::Serde(ErrorInfo::new("deserialize-json", err.to_string()))
        })
    }

    /// Serializes the definition to a compact binary representation using
    /// `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CredenceError> {
        bincode::serialize(self)
            .map_err(|err| CredenceError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
    }

    /// Restores a definition from its binary representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CredenceError> {
        bincode::deserialize(bytes).map_err(|err| {
            CredenceError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string()))
        })
    }
}
