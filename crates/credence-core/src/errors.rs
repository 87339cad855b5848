//! Structured error types shared across credence crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`CredenceError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (variable names, row indices, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the credence engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CredenceError {
    /// An edge or structure operation would introduce a directed cycle.
    #[error("cyclic graph: {0}")]
    CyclicGraph(ErrorInfo),
    /// A variable name was not found in the network.
    #[error("unknown variable: {0}")]
    UnknownVariable(ErrorInfo),
    /// A structural variable has no conditional table attached.
    #[error("missing table: {0}")]
    MissingTable(ErrorInfo),
    /// A conditional table violates a validation rule.
    #[error("invalid table: {0}")]
    InvalidTable(ErrorInfo),
    /// Evidence references an unknown variable or an out-of-domain value.
    #[error("invalid evidence: {0}")]
    InvalidEvidence(ErrorInfo),
    /// The supplied evidence carries zero total probability mass.
    #[error("zero evidence probability: {0}")]
    ZeroEvidenceProbability(ErrorInfo),
    /// A caller supplied argument is outside the accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl CredenceError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            CredenceError::CyclicGraph(info)
            | CredenceError::UnknownVariable(info)
            | CredenceError::MissingTable(info)
            | CredenceError::InvalidTable(info)
            | CredenceError::InvalidEvidence(info)
            | CredenceError::ZeroEvidenceProbability(info)
            | CredenceError::InvalidArgument(info)
            | CredenceError::Serde(info) => info,
        }
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Aggregated list of validation failures produced while preparing a network.
///
/// Preparation never stops at the first defect: every structural and table
/// rule is checked and each violation is collected here, so an incrementally
/// edited network surfaces its complete defect list in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct ValidationReport {
    /// Individual failures in deterministic (variable name, rule) order.
    pub errors: Vec<CredenceError>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a failure.
    pub fn push(&mut self, error: CredenceError) {
        self.errors.push(error);
    }

    /// Returns true when no failure has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Converts the report into a `Result`, succeeding when empty.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl From<CredenceError> for ValidationReport {
    fn from(error: CredenceError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}
