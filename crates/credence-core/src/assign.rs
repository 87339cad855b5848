//! Partial and full assignments of values to named variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Partial assignment of observed values used to condition a query.
///
/// A variable absent from the map is unobserved; the imputer treats absence
/// as the missing-value marker. Entries iterate in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    observed: BTreeMap<String, Value>,
}

impl Evidence {
    /// Creates empty evidence (no variable observed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style observation of a single variable.
    pub fn observe(mut self, variable: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(variable, value);
        self
    }

    /// Records an observation, replacing any previous value for the variable.
    pub fn set(&mut self, variable: impl Into<String>, value: impl Into<Value>) {
        self.observed.insert(variable.into(), value.into());
    }

    /// Returns the observed value for `variable`, if any.
    pub fn get(&self, variable: &str) -> Option<&Value> {
        self.observed.get(variable)
    }

    /// Returns true when `variable` has an observed value.
    pub fn is_observed(&self, variable: &str) -> bool {
        self.observed.contains_key(variable)
    }

    /// Number of observed variables.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// Returns true when nothing is observed.
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Iterates `(variable, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.observed.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Evidence {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut evidence = Evidence::new();
        for (name, value) in iter {
            evidence.set(name, value);
        }
        evidence
    }
}

/// Full assignment of every network variable to a value.
///
/// Produced by the forward sampler and the imputer. Entries iterate in name
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    values: BTreeMap<String, Value>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for a variable, replacing any previous entry.
    pub fn set(&mut self, variable: impl Into<String>, value: Value) {
        self.values.insert(variable.into(), value);
    }

    /// Returns the value assigned to `variable`, if any.
    pub fn get(&self, variable: &str) -> Option<&Value> {
        self.values.get(variable)
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no variable is assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(variable, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        let mut assignment = Assignment::new();
        for (name, value) in iter {
            assignment.set(name, value);
        }
        assignment
    }
}
