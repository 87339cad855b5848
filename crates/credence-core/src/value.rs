//! Discrete outcome values and ordered value domains.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::errors::{CredenceError, ErrorInfo};

/// A single discrete outcome of a random variable.
///
/// The set of representations is closed and contains no floating point
/// variant, so equality, ordering, and hashing are total and well-defined.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Boolean outcome.
    Bool(bool),
    /// Integer outcome.
    Int(i64),
    /// Named categorical outcome.
    Label(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Label(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Label(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Label(value)
    }
}

/// Ordered set of distinct values a variable can take.
///
/// Order is semantic: it is the declaration order of the owning table's
/// first row, it fixes the layout of compiled probability tables, and it is
/// the tie-break order for `argmax` over query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    values: IndexSet<Value>,
}

impl Domain {
    /// Builds a domain from values in declaration order.
    ///
    /// Fails when the list is empty or contains a duplicate.
    pub fn from_values<I>(values: I) -> Result<Self, CredenceError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut set = IndexSet::new();
        for value in values {
            if !set.insert(value.clone()) {
                return Err(CredenceError::InvalidArgument(
                    ErrorInfo::new("duplicate-domain-value", "domain lists a value twice")
                        .with_context("value", value.to_string()),
                ));
            }
        }
        if set.is_empty() {
            return Err(CredenceError::InvalidArgument(ErrorInfo::new(
                "empty-domain",
                "a variable domain requires at least one value",
            )));
        }
        Ok(Self { values: set })
    }

    /// Number of values in the domain.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the domain holds no values (never after construction).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the position of `value` within the domain, if present.
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.values.get_index_of(value)
    }

    /// Returns the value stored at `index`.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get_index(index)
    }

    /// Returns true when `value` belongs to the domain.
    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    /// Iterates the values in domain order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.values.iter()
    }
}

impl std::ops::Index<usize> for Domain {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}
