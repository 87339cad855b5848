//! Validation of raw tables against a structure and compilation into an
//! immutable, query-ready network.

use std::collections::{BTreeMap, BTreeSet};

use credence_core::errors::{CredenceError, ErrorInfo, ValidationReport};
use credence_core::{Domain, Evidence, Value};
use log::debug;

use crate::structure::NetworkStructure;
use crate::table::{ConditionalTable, TableStore};

/// Maximum absolute deviation from 1.0 tolerated for a row sum.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Immutable, query-ready form of a validated network.
///
/// Variables are re-indexed densely in name order, so two preparations of
/// the same structure and tables produce identical layouts regardless of
/// registration order. Parent lists, children lists, and Markov blankets
/// are sorted; probability tables are dense row-major arrays.
#[derive(Debug, Clone)]
pub struct PreparedNetwork {
    pub(crate) names: Vec<String>,
    pub(crate) index: BTreeMap<String, usize>,
    pub(crate) domains: Vec<Domain>,
    pub(crate) parents: Vec<Vec<usize>>,
    pub(crate) children: Vec<Vec<usize>>,
    pub(crate) blankets: Vec<Vec<usize>>,
    pub(crate) order: Vec<usize>,
    pub(crate) tables: Vec<CompiledTable>,
}

/// Dense probability table for one variable.
///
/// `probs` is row-major over the canonical parent order: the row for a
/// parent assignment starts at `sum(parent_value_index * stride) * k` where
/// `k` is the child's domain size.
#[derive(Debug, Clone)]
pub(crate) struct CompiledTable {
    pub(crate) strides: Vec<usize>,
    pub(crate) probs: Vec<f64>,
}

impl PreparedNetwork {
    /// Number of variables in the network.
    pub fn variable_count(&self) -> usize {
        self.names.len()
    }

    /// Returns the dense index of `name`, if registered.
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the name stored at `variable`.
    pub fn variable_name(&self, variable: usize) -> &str {
        &self.names[variable]
    }

    /// Returns the value domain of `variable`.
    pub fn domain(&self, variable: usize) -> &Domain {
        &self.domains[variable]
    }

    /// Parents of `variable` in canonical (name-sorted) order.
    pub fn parents(&self, variable: usize) -> &[usize] {
        &self.parents[variable]
    }

    /// Children of `variable` in name-sorted order.
    pub fn children(&self, variable: usize) -> &[usize] {
        &self.children[variable]
    }

    /// Markov blanket of `variable`: parents, children, and the children's
    /// other parents, excluding the variable itself.
    pub fn markov_blanket(&self, variable: usize) -> &[usize] {
        &self.blankets[variable]
    }

    /// Dense variable indices in topological order.
    pub fn topological_order(&self) -> &[usize] {
        &self.order
    }

    /// Returns the distribution row of `variable` selected by the parent
    /// values recorded in `state`.
    ///
    /// `state` assigns a domain index to every variable; only the entries at
    /// the variable's parents are read.
    pub fn conditional_row(&self, variable: usize, state: &[usize]) -> &[f64] {
        let table = &self.tables[variable];
        let mut row = 0;
        for (slot, parent) in self.parents[variable].iter().enumerate() {
            row += state[*parent] * table.strides[slot];
        }
        let width = self.domains[variable].len();
        &table.probs[row * width..(row + 1) * width]
    }

    /// Probability of `variable` taking `value_index` given the parent
    /// values recorded in `state`.
    pub fn conditional_probability(
        &self,
        variable: usize,
        state: &[usize],
        value_index: usize,
    ) -> f64 {
        self.conditional_row(variable, state)[value_index]
    }

    /// Joint probability of the full assignment recorded in `state`.
    ///
    /// Product of every variable's conditional probability; returns early
    /// once a factor is zero.
    pub fn joint_weight(&self, state: &[usize]) -> f64 {
        let mut weight = 1.0;
        for variable in 0..self.names.len() {
            weight *= self.conditional_probability(variable, state, state[variable]);
            if weight == 0.0 {
                return 0.0;
            }
        }
        weight
    }

    /// Translates named evidence into a per-variable `Option<value index>`
    /// vector.
    ///
    /// Fails with `InvalidEvidence` when a variable is unknown or a value is
    /// outside its domain.
    pub fn compile_evidence(&self, evidence: &Evidence) -> Result<Vec<Option<usize>>, CredenceError> {
        let mut compiled = vec![None; self.names.len()];
        for (name, value) in evidence.iter() {
            let variable = match self.index.get(name) {
                Some(variable) => *variable,
                None => {
                    return Err(CredenceError::InvalidEvidence(
                        ErrorInfo::new("evidence-variable", "evidence names an unknown variable")
                            .with_context("variable", name),
                    ));
                }
            };
            let value_index = match self.domains[variable].index_of(value) {
                Some(index) => index,
                None => {
                    return Err(CredenceError::InvalidEvidence(
                        ErrorInfo::new("evidence-value", "evidence value is outside the domain")
                            .with_context("variable", name)
                            .with_context("value", value.to_string()),
                    ));
                }
            };
            compiled[variable] = Some(value_index);
        }
        Ok(compiled)
    }
}

/// Runs every validation rule and collects all violations.
///
/// Rules, in order: global acyclicity, table presence per structural
/// variable, no table for an unregistered variable, per-row local checks
/// (parent-set match, finite non-negative probabilities, row sums within
/// [`ROW_SUM_TOLERANCE`] of 1, no duplicate values, one value set across
/// rows), then cross-table checks for variables whose own and parents'
/// tables passed (parent values drawn from the parent's domain, every
/// parent combination covered exactly once). Validation never stops at the
/// first defect.
pub fn validate(structure: &NetworkStructure, store: &TableStore) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Err(err) = structure.topological_order() {
        report.push(err);
    }

    for variable in store.variables() {
        if !structure.contains(variable) {
            report.push(CredenceError::UnknownVariable(
                ErrorInfo::new("unknown-variable", "table targets an unregistered variable")
                    .with_context("variable", variable),
            ));
        }
    }

    let mut domains: BTreeMap<&str, Domain> = BTreeMap::new();
    for variable in structure.variables() {
        let table = match store.get(variable) {
            Some(table) => table,
            None => {
                report.push(missing_table(variable));
                continue;
            }
        };
        let parents = match structure.parents_of(variable) {
            Ok(parents) => parents,
            Err(err) => {
                report.push(err);
                continue;
            }
        };
        let before = report.len();
        let domain = validate_local(variable, &parents, table, &mut report);
        if report.len() == before {
            if let Some(domain) = domain {
                domains.insert(variable, domain);
            }
        }
    }

    for variable in structure.variables() {
        if !domains.contains_key(variable) {
            continue;
        }
        let parents = match structure.parents_of(variable) {
            Ok(parents) => parents,
            Err(_) => continue,
        };
        if parents.iter().any(|parent| !domains.contains_key(parent)) {
            continue;
        }
        if let Some(table) = store.get(variable) {
            validate_coverage(variable, &parents, table, &domains, &mut report);
        }
    }

    if !report.is_empty() {
        debug!(
            "validation rejected network: {} error(s) collected",
            report.len()
        );
    }
    report
}

/// Validates and compiles the network into its immutable prepared form.
///
/// All validation failures are returned together in one report. Preparing
/// the same structure and store twice yields networks with equal canonical
/// hashes that answer queries identically.
pub fn prepare(
    structure: &NetworkStructure,
    store: &TableStore,
) -> Result<PreparedNetwork, ValidationReport> {
    validate(structure, store).into_result()?;

    let names: Vec<String> = structure.variables().map(str::to_string).collect();
    let index: BTreeMap<String, usize> = names
        .iter()
        .enumerate()
        .map(|(position, name)| (name.clone(), position))
        .collect();

    let mut domains = Vec::with_capacity(names.len());
    let mut parents = Vec::with_capacity(names.len());
    let mut children = Vec::with_capacity(names.len());
    for name in &names {
        let table = store
            .get(name)
            .ok_or_else(|| ValidationReport::from(missing_table(name)))?;
        let first = table
            .rows
            .first()
            .ok_or_else(|| ValidationReport::from(invalid_table(name, "no-rows", "table has no rows")))?;
        let domain = Domain::from_values(first.distribution.iter().map(|(value, _)| value.clone()))
            .map_err(ValidationReport::from)?;
        domains.push(domain);
        parents.push(resolve(structure.parents_of(name)?, &index));
        children.push(resolve(structure.children_of(name)?, &index));
    }

    let mut blankets = Vec::with_capacity(names.len());
    for variable in 0..names.len() {
        let mut blanket: BTreeSet<usize> = BTreeSet::new();
        blanket.extend(parents[variable].iter().copied());
        for child in &children[variable] {
            blanket.insert(*child);
            blanket.extend(parents[*child].iter().copied());
        }
        blanket.remove(&variable);
        blankets.push(blanket.into_iter().collect());
    }

    let order: Vec<usize> = structure
        .topological_order()?
        .iter()
        .map(|name| index[name])
        .collect();

    let mut tables = Vec::with_capacity(names.len());
    for variable in 0..names.len() {
        let table = store
            .get(&names[variable])
            .ok_or_else(|| ValidationReport::from(missing_table(&names[variable])))?;
        tables.push(compile_table(
            variable,
            table,
            &names,
            &domains,
            &parents[variable],
        )?);
    }

    debug!(
        "prepared network: {} variables, {} edges",
        names.len(),
        structure.edge_count()
    );
    Ok(PreparedNetwork {
        names,
        index,
        domains,
        parents,
        children,
        blankets,
        order,
        tables,
    })
}

fn resolve(names: Vec<&str>, index: &BTreeMap<String, usize>) -> Vec<usize> {
    let mut resolved: Vec<usize> = names.iter().map(|name| index[*name]).collect();
    resolved.sort_unstable();
    resolved
}

fn compile_table(
    variable: usize,
    table: &ConditionalTable,
    names: &[String],
    domains: &[Domain],
    parents: &[usize],
) -> Result<CompiledTable, ValidationReport> {
    let sizes: Vec<usize> = parents.iter().map(|parent| domains[*parent].len()).collect();
    let mut strides = vec![1; parents.len()];
    for slot in (0..parents.len().saturating_sub(1)).rev() {
        strides[slot] = strides[slot + 1] * sizes[slot + 1];
    }
    let rows: usize = sizes.iter().product();
    let width = domains[variable].len();
    let mut probs = vec![0.0; rows * width];

    for row in &table.rows {
        let mut offset = 0;
        for (slot, parent) in parents.iter().enumerate() {
            let value = row
                .parents
                .get(names[*parent].as_str())
                .ok_or_else(|| ValidationReport::from(parent_mismatch(&table.child)))?;
            let value_index = domains[*parent]
                .index_of(value)
                .ok_or_else(|| ValidationReport::from(parent_mismatch(&table.child)))?;
            offset += value_index * strides[slot];
        }
        for (value, probability) in &row.distribution {
            let value_index = domains[variable]
                .index_of(value)
                .ok_or_else(|| ValidationReport::from(parent_mismatch(&table.child)))?;
            probs[offset * width + value_index] = *probability;
        }
    }
    Ok(CompiledTable { strides, probs })
}

fn validate_local(
    variable: &str,
    parents: &[&str],
    table: &ConditionalTable,
    report: &mut ValidationReport,
) -> Option<Domain> {
    if table.rows.is_empty() {
        report.push(invalid_table(variable, "no-rows", "table has no rows"));
        return None;
    }

    let expected_parents: BTreeSet<&str> = parents.iter().copied().collect();
    let mut first_values: Option<BTreeSet<&Value>> = None;
    for (row_index, row) in table.rows.iter().enumerate() {
        let found: BTreeSet<&str> = row.parents.keys().map(String::as_str).collect();
        if found != expected_parents {
            report.push(
                CredenceError::InvalidTable(
                    ErrorInfo::new("parent-mismatch", "row conditions on the wrong parent set")
                        .with_context("variable", variable)
                        .with_context("row", row_index.to_string())
                        .with_context("expected", join(&expected_parents))
                        .with_context("found", join(&found)),
                ),
            );
        }

        if row.distribution.is_empty() {
            report.push(invalid_table_row(
                variable,
                row_index,
                "empty-distribution",
                "row carries no probabilities",
            ));
            continue;
        }

        let mut seen: BTreeSet<&Value> = BTreeSet::new();
        let mut sum = 0.0;
        for (value, probability) in &row.distribution {
            if !seen.insert(value) {
                report.push(
                    CredenceError::InvalidTable(
                        ErrorInfo::new("duplicate-value", "row lists a value twice")
                            .with_context("variable", variable)
                            .with_context("row", row_index.to_string())
                            .with_context("value", value.to_string()),
                    ),
                );
            }
            if !probability.is_finite() {
                report.push(invalid_table_row(
                    variable,
                    row_index,
                    "non-finite-probability",
                    "probability is NaN or infinite",
                ));
                continue;
            }
            if *probability < 0.0 {
                report.push(invalid_table_row(
                    variable,
                    row_index,
                    "negative-probability",
                    "probability is negative",
                ));
            }
            sum += probability;
        }
        if sum.is_finite() && (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
            report.push(
                CredenceError::InvalidTable(
                    ErrorInfo::new("row-sum", "row probabilities do not sum to 1")
                        .with_context("variable", variable)
                        .with_context("row", row_index.to_string())
                        .with_context("sum", format!("{sum}"))
                        .with_hint("rows are never renormalized; fix the table"),
                ),
            );
        }

        match &first_values {
            None => first_values = Some(seen),
            Some(first) => {
                if &seen != first {
                    report.push(invalid_table_row(
                        variable,
                        row_index,
                        "value-set-mismatch",
                        "row uses a different value set than the first row",
                    ));
                }
            }
        }
    }

    Domain::from_values(
        table.rows[0]
            .distribution
            .iter()
            .map(|(value, _)| value.clone()),
    )
    .ok()
}

fn validate_coverage(
    variable: &str,
    parents: &[&str],
    table: &ConditionalTable,
    domains: &BTreeMap<&str, Domain>,
    report: &mut ValidationReport,
) {
    let expected: usize = parents
        .iter()
        .map(|parent| domains[parent].len())
        .product();
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    for (row_index, row) in table.rows.iter().enumerate() {
        let mut key = Vec::with_capacity(parents.len());
        let mut in_domain = true;
        for parent in parents {
            let value = match row.parents.get(*parent) {
                Some(value) => value,
                None => {
                    in_domain = false;
                    break;
                }
            };
            match domains[parent].index_of(value) {
                Some(index) => key.push(index),
                None => {
                    report.push(
                        CredenceError::InvalidTable(
                            ErrorInfo::new(
                                "parent-value-out-of-domain",
                                "row conditions on a value outside the parent's domain",
                            )
                            .with_context("variable", variable)
                            .with_context("parent", *parent)
                            .with_context("row", row_index.to_string())
                            .with_context("value", value.to_string()),
                        ),
                    );
                    in_domain = false;
                }
            }
        }
        if in_domain && !seen.insert(key) {
            report.push(invalid_table_row(
                variable,
                row_index,
                "duplicate-parent-combination",
                "parent combination appears in more than one row",
            ));
        }
    }
    if seen.len() != expected {
        report.push(
            CredenceError::InvalidTable(
                ErrorInfo::new(
                    "missing-parent-combination",
                    "rows do not cover every parent combination exactly once",
                )
                .with_context("variable", variable)
                .with_context("covered", seen.len().to_string())
                .with_context("expected", expected.to_string()),
            ),
        );
    }
}

fn missing_table(variable: &str) -> CredenceError {
    CredenceError::MissingTable(
        ErrorInfo::new("missing-table", "variable has no conditional table")
            .with_context("variable", variable),
    )
}

fn invalid_table(variable: &str, code: &str, message: &str) -> CredenceError {
    CredenceError::InvalidTable(
        ErrorInfo::new(code, message).with_context("variable", variable),
    )
}

fn invalid_table_row(variable: &str, row: usize, code: &str, message: &str) -> CredenceError {
    CredenceError::InvalidTable(
        ErrorInfo::new(code, message)
            .with_context("variable", variable)
            .with_context("row", row.to_string()),
    )
}

fn parent_mismatch(variable: &str) -> CredenceError {
    invalid_table(
        variable,
        "parent-mismatch",
        "compiled row does not match the validated parent layout",
    )
}

fn join(names: &BTreeSet<&str>) -> String {
    names.iter().copied().collect::<Vec<_>>().join(",")
}
