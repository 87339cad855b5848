//! Directed acyclic structure over named variables.

use std::collections::{BTreeMap, BTreeSet};

use credence_core::errors::{CredenceError, ErrorInfo};
use credence_core::VariableId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VariableRecord {
    name: String,
    parents: BTreeSet<VariableId>,
    children: BTreeSet<VariableId>,
}

impl VariableRecord {
    fn new(name: String) -> Self {
        Self {
            name,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }
}

/// Mutable directed acyclic graph over named variables.
///
/// Acyclicity is an invariant, not a validation step: every `add_edge` call
/// runs a DFS over the would-be adjacency and rejects the edge before it is
/// stored, so a structure reachable through this API never contains a cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkStructure {
    records: Vec<VariableRecord>,
    names: BTreeMap<String, VariableId>,
}

impl NetworkStructure {
    /// Creates an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a structure from `(parent, child)` name pairs.
    ///
    /// Both endpoints of every pair are registered on first use.
    pub fn from_edges<S, I>(edges: I) -> Result<Self, CredenceError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, S)>,
    {
        let mut structure = Self::new();
        for (parent, child) in edges {
            let parent = parent.into();
            let child = child.into();
            structure.add_variable(parent.clone());
            structure.add_variable(child.clone());
            structure.add_edge(&parent, &child)?;
        }
        Ok(structure)
    }

    /// Registers a variable, returning the existing id when the name is
    /// already present.
    pub fn add_variable(&mut self, name: impl Into<String>) -> VariableId {
        let name = name.into();
        if let Some(id) = self.names.get(&name) {
            return *id;
        }
        let id = make_id(self.records.len());
        self.records.push(VariableRecord::new(name.clone()));
        self.names.insert(name, id);
        id
    }

    /// Adds a directed edge from `parent` to `child`.
    ///
    /// Fails when either endpoint is unregistered, when the edge would be a
    /// self loop or a duplicate, or when it would close a directed cycle.
    pub fn add_edge(&mut self, parent: &str, child: &str) -> Result<(), CredenceError> {
        let parent_id = self.lookup(parent)?;
        let child_id = self.lookup(child)?;
        if parent_id == child_id {
            return Err(CredenceError::CyclicGraph(
                ErrorInfo::new("self-loop", "a variable cannot be its own parent")
                    .with_context("variable", parent),
            ));
        }
        if self.records[id_index(child_id)].parents.contains(&parent_id) {
            return Err(CredenceError::InvalidArgument(
                ErrorInfo::new("duplicate-edge", "edge is already present")
                    .with_context("parent", parent)
                    .with_context("child", child),
            ));
        }
        if self.would_create_cycle(parent_id, child_id) {
            return Err(CredenceError::CyclicGraph(
                ErrorInfo::new("edge-would-cycle", "edge would introduce a directed cycle")
                    .with_context("parent", parent)
                    .with_context("child", child),
            ));
        }
        self.records[id_index(child_id)].parents.insert(parent_id);
        self.records[id_index(parent_id)].children.insert(child_id);
        Ok(())
    }

    /// Returns the id registered for `name`, if any.
    pub fn variable_id(&self, name: &str) -> Option<VariableId> {
        self.names.get(name).copied()
    }

    /// Returns the name registered under `id`.
    pub fn variable_name(&self, id: VariableId) -> Result<&str, CredenceError> {
        self.records
            .get(id_index(id))
            .map(|record| record.name.as_str())
            .ok_or_else(|| unknown_id(id))
    }

    /// Returns true when `name` is a registered variable.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Number of registered variables.
    pub fn variable_count(&self) -> usize {
        self.records.len()
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.records.iter().map(|record| record.parents.len()).sum()
    }

    /// Iterates variable names in lexical order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Returns every `(parent, child)` edge, sorted by parent then child.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for record in &self.records {
            for parent in &record.parents {
                edges.push((
                    self.records[id_index(*parent)].name.as_str(),
                    record.name.as_str(),
                ));
            }
        }
        edges.sort();
        edges
    }

    /// Returns the parents of `name`, sorted by name.
    pub fn parents_of(&self, name: &str) -> Result<Vec<&str>, CredenceError> {
        let id = self.lookup(name)?;
        Ok(self.sorted_names(&self.records[id_index(id)].parents))
    }

    /// Returns the children of `name`, sorted by name.
    pub fn children_of(&self, name: &str) -> Result<Vec<&str>, CredenceError> {
        let id = self.lookup(name)?;
        Ok(self.sorted_names(&self.records[id_index(id)].children))
    }

    /// Returns every variable name in topological order.
    ///
    /// Kahn's algorithm with a lexical tie-break over the ready set, so two
    /// structurally identical networks order their variables identically no
    /// matter the registration sequence. The cycle arm is unreachable for
    /// structures built through `add_edge`, but deserialized adjacency is
    /// re-checked here.
    pub fn topological_order(&self) -> Result<Vec<String>, CredenceError> {
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            in_degree.insert(record.name.as_str(), record.parents.len());
        }
        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(self.records.len());
        while let Some(name) = ready.iter().next().copied() {
            ready.remove(name);
            order.push(name.to_string());
            let id = self.names[name];
            for child in &self.records[id_index(id)].children {
                let child_name = self.records[id_index(*child)].name.as_str();
                if let Some(degree) = in_degree.get_mut(child_name) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(child_name);
                    }
                }
            }
        }
        if order.len() != self.records.len() {
            return Err(CredenceError::CyclicGraph(
                ErrorInfo::new("cyclic-structure", "structure contains a directed cycle")
                    .with_context("ordered", order.len().to_string())
                    .with_context("total", self.records.len().to_string()),
            ));
        }
        Ok(order)
    }

    pub(crate) fn parent_ids(&self, id: VariableId) -> &BTreeSet<VariableId> {
        &self.records[id_index(id)].parents
    }

    pub(crate) fn child_ids(&self, id: VariableId) -> &BTreeSet<VariableId> {
        &self.records[id_index(id)].children
    }

    fn lookup(&self, name: &str) -> Result<VariableId, CredenceError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| unknown_variable(name))
    }

    fn sorted_names(&self, ids: &BTreeSet<VariableId>) -> Vec<&str> {
        let mut names: Vec<&str> = ids
            .iter()
            .map(|id| self.records[id_index(*id)].name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    fn would_create_cycle(&self, parent: VariableId, child: VariableId) -> bool {
        let mut adjacency: BTreeMap<VariableId, BTreeSet<VariableId>> = BTreeMap::new();
        for (index, record) in self.records.iter().enumerate() {
            adjacency.insert(make_id(index), record.children.clone());
        }
        adjacency.entry(parent).or_default().insert(child);
        let mut states: BTreeMap<VariableId, VisitState> = adjacency
            .keys()
            .map(|id| (*id, VisitState::NotVisited))
            .collect();
        for id in adjacency.keys().copied().collect::<Vec<_>>() {
            if dfs(id, &adjacency, &mut states) {
                return true;
            }
        }
        false
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    NotVisited,
    Visiting,
    Visited,
}

fn dfs(
    node: VariableId,
    adjacency: &BTreeMap<VariableId, BTreeSet<VariableId>>,
    states: &mut BTreeMap<VariableId, VisitState>,
) -> bool {
    match states.get(&node).copied().unwrap_or(VisitState::NotVisited) {
        VisitState::Visiting => true,
        VisitState::Visited => false,
        VisitState::NotVisited => {
            states.insert(node, VisitState::Visiting);
            if let Some(neighbours) = adjacency.get(&node) {
                for neighbour in neighbours {
                    if dfs(*neighbour, adjacency, states) {
                        return true;
                    }
                }
            }
            states.insert(node, VisitState::Visited);
            false
        }
    }
}

pub(crate) fn make_id(index: usize) -> VariableId {
    VariableId::from_raw(index as u64)
}

pub(crate) fn id_index(id: VariableId) -> usize {
    id.as_raw() as usize
}

pub(crate) fn unknown_variable(name: &str) -> CredenceError {
    CredenceError::UnknownVariable(
        ErrorInfo::new("unknown-variable", "variable is not registered")
            .with_context("variable", name),
    )
}

fn unknown_id(id: VariableId) -> CredenceError {
    CredenceError::UnknownVariable(
        ErrorInfo::new("unknown-variable", "variable id is out of range")
            .with_context("id", id.as_raw().to_string()),
    )
}
