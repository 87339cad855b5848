//! Query results: discrete distributions over a variable's domain.

use credence_core::errors::{CredenceError, ErrorInfo};
use credence_core::{Domain, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Total weight at or below which normalization refuses to divide.
///
/// A grand total this small means the evidence is impossible under the
/// network (or numerically indistinguishable from impossible); the engines
/// surface that as `ZeroEvidenceProbability` instead of returning NaN.
pub const ZERO_MASS_TOLERANCE: f64 = 1e-12;

/// Probability distribution over a query variable's domain.
///
/// Support iterates in domain order, probabilities sum to 1 (exactly for the
/// exact engine up to floating error, empirically for samplers), and
/// `argmax` ties break toward the earlier domain value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SerializableDistribution", into = "SerializableDistribution")]
pub struct Distribution {
    support: IndexMap<Value, f64>,
}

/// Wire form of [`Distribution`]: the support as explicit pairs, since
/// formats like JSON cannot key a map on a structured value.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename = "Distribution")]
struct SerializableDistribution {
    support: Vec<(Value, f64)>,
}

impl From<Distribution> for SerializableDistribution {
    fn from(distribution: Distribution) -> Self {
        Self {
            support: distribution.support.into_iter().collect(),
        }
    }
}

impl From<SerializableDistribution> for Distribution {
    fn from(serializable: SerializableDistribution) -> Self {
        Self {
            support: serializable.support.into_iter().collect(),
        }
    }
}

impl Distribution {
    /// Normalizes raw per-value weights into a distribution.
    ///
    /// `weights` must be indexed like `domain`. Fails with
    /// `ZeroEvidenceProbability` when the grand total is at or below
    /// [`ZERO_MASS_TOLERANCE`].
    pub fn from_weights(domain: &Domain, weights: &[f64]) -> Result<Self, CredenceError> {
        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= ZERO_MASS_TOLERANCE {
            return Err(CredenceError::ZeroEvidenceProbability(
                ErrorInfo::new(
                    "zero-evidence",
                    "accumulated probability mass is zero or vanishing",
                )
                .with_context("total", format!("{total}"))
                .with_hint("the evidence is impossible under this network"),
            ));
        }
        let support = domain
            .values()
            .zip(weights)
            .map(|(value, weight)| (value.clone(), weight / total))
            .collect();
        Ok(Self { support })
    }

    /// Probability of `value`, zero when outside the support.
    pub fn probability(&self, value: &Value) -> f64 {
        self.support.get(value).copied().unwrap_or(0.0)
    }

    /// Most probable value; ties break toward the earlier domain value.
    ///
    /// `None` only for an empty support, which engine output never has.
    pub fn argmax(&self) -> Option<&Value> {
        let mut best: Option<(&Value, f64)> = None;
        for (value, probability) in &self.support {
            match best {
                None => best = Some((value, *probability)),
                Some((_, current)) if *probability > current => best = Some((value, *probability)),
                _ => {}
            }
        }
        best.map(|(value, _)| value)
    }

    /// Total variation distance to another distribution over the same domain.
    pub fn total_variation(&self, other: &Distribution) -> f64 {
        let mut sum = 0.0;
        for (value, probability) in &self.support {
            sum += (probability - other.probability(value)).abs();
        }
        for (value, probability) in &other.support {
            if !self.support.contains_key(value) {
                sum += probability.abs();
            }
        }
        sum / 2.0
    }

    /// Number of values in the support.
    pub fn len(&self) -> usize {
        self.support.len()
    }

    /// Returns true when the support is empty (never for engine output).
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// Iterates `(value, probability)` pairs in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, f64)> {
        self.support
            .iter()
            .map(|(value, probability)| (value, *probability))
    }
}
