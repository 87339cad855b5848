//! Caller-authored conditional probability tables.

use std::collections::BTreeMap;

use credence_core::errors::ValidationReport;
use credence_core::Value;
use serde::{Deserialize, Serialize};

use crate::prepare;
use crate::structure::NetworkStructure;

/// One row of a conditional table: a full parent assignment and the
/// distribution of the child under it.
///
/// Distribution entries keep their declaration order; the first row of a
/// table fixes the child's domain order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Value of every parent this row conditions on.
    pub parents: BTreeMap<String, Value>,
    /// Probability of each child value, in declaration order.
    pub distribution: Vec<(Value, f64)>,
}

/// Raw conditional probability table for one variable.
///
/// Nothing is checked at construction time; tables stay caller-authored
/// until `prepare` runs the full rule set over the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalTable {
    /// Variable the table describes.
    pub child: String,
    /// One row per combination of parent values; a single row with an empty
    /// parent assignment for root variables.
    pub rows: Vec<TableRow>,
}

impl ConditionalTable {
    /// Creates an empty table for `child`.
    pub fn new(child: impl Into<String>) -> Self {
        Self {
            child: child.into(),
            rows: Vec::new(),
        }
    }

    /// Builder-style append of a conditioned row.
    pub fn with_row<S, V, W, P, D>(mut self, parents: P, distribution: D) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
        W: Into<Value>,
        P: IntoIterator<Item = (S, V)>,
        D: IntoIterator<Item = (W, f64)>,
    {
        self.rows.push(TableRow {
            parents: parents
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            distribution: distribution
                .into_iter()
                .map(|(value, probability)| (value.into(), probability))
                .collect(),
        });
        self
    }

    /// Builder-style append of the single row of a root variable.
    pub fn with_root_row<W, D>(self, distribution: D) -> Self
    where
        W: Into<Value>,
        D: IntoIterator<Item = (W, f64)>,
    {
        self.with_row(Vec::<(String, Value)>::new(), distribution)
    }
}

/// Store of raw tables, at most one per variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStore {
    tables: BTreeMap<String, ConditionalTable>,
}

impl TableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table, replacing any previous table for the same variable.
    pub fn set(&mut self, table: ConditionalTable) {
        self.tables.insert(table.child.clone(), table);
    }

    /// Returns the table stored for `variable`, if any.
    pub fn get(&self, variable: &str) -> Option<&ConditionalTable> {
        self.tables.get(variable)
    }

    /// Iterates the variables that currently have a table, in name order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterates stored tables in variable name order.
    pub fn tables(&self) -> impl Iterator<Item = &ConditionalTable> {
        self.tables.values()
    }

    /// Number of stored tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true when no table is stored.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Runs the full validation rule set against `structure`.
    ///
    /// Every violation is collected; see [`prepare::validate`].
    pub fn validate(&self, structure: &NetworkStructure) -> ValidationReport {
        prepare::validate(structure, self)
    }
}
