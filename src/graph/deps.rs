// src/graph/deps.rs

use std::collections::{BTreeMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

use crate::model::TaskId;

/// One dependency edge: `dependent` cannot be completed before `dependency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub dependent: TaskId,
    pub dependency: TaskId,
}

/// Dependency edges shared by the whole board, indexed by dependent.
///
/// Order matters: a task's dependencies are visited in the order they were
/// added. Duplicate edges and self edges are representable; the evaluator
/// deals with them.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    outgoing: BTreeMap<TaskId, Vec<TaskId>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self {
            outgoing: BTreeMap::new(),
        }
    }

    /// Every edge, grouped by dependent.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.outgoing.iter().flat_map(|(&dependent, deps)| {
            deps.iter().map(move |&dependency| Edge {
                dependent,
                dependency,
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    pub fn add(&mut self, dependent: TaskId, dependency: TaskId) {
        self.outgoing.entry(dependent).or_default().push(dependency);
    }

    /// Direct dependencies of `task`, in insertion order.
    pub fn dependencies_of(&self, task: TaskId) -> &[TaskId] {
        self.outgoing
            .get(&task)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks that list `task` as a direct dependency.
    pub fn dependents_of(&self, task: TaskId) -> Vec<TaskId> {
        self.outgoing
            .iter()
            .filter(|(_, deps)| deps.contains(&task))
            .map(|(&dependent, _)| dependent)
            .collect()
    }

    pub fn contains(&self, dependent: TaskId, dependency: TaskId) -> bool {
        self.dependencies_of(dependent).contains(&dependency)
    }

    pub fn has_dependencies(&self, task: TaskId) -> bool {
        !self.dependencies_of(task).is_empty()
    }

    /// Remove the first matching edge. Returns `false` if there was none.
    pub fn remove_first(&mut self, dependent: TaskId, dependency: TaskId) -> bool {
        let Some(deps) = self.outgoing.get_mut(&dependent) else {
            return false;
        };
        let Some(pos) = deps.iter().position(|&d| d == dependency) else {
            return false;
        };
        deps.remove(pos);
        if deps.is_empty() {
            self.outgoing.remove(&dependent);
        }
        true
    }

    /// Drop every outgoing edge of `dependent` and store the new ones.
    pub fn replace_for(&mut self, dependent: TaskId, dependencies: &[TaskId]) {
        if dependencies.is_empty() {
            self.outgoing.remove(&dependent);
        } else {
            self.outgoing.insert(dependent, dependencies.to_vec());
        }
    }

    /// Drop every edge touching `task`, in either direction. Returns how
    /// many edges went away.
    pub fn drop_task(&mut self, task: TaskId) -> usize {
        let mut dropped = self.outgoing.remove(&task).map_or(0, |v| v.len());
        for deps in self.outgoing.values_mut() {
            let before = deps.len();
            deps.retain(|&d| d != task);
            dropped += before - deps.len();
        }
        self.outgoing.retain(|_, deps| !deps.is_empty());
        dropped
    }

    /// Build a petgraph view with edges pointing `dependency -> dependent`.
    pub fn to_graph(&self) -> DiGraphMap<TaskId, ()> {
        let mut graph = DiGraphMap::new();
        for e in self.edges() {
            graph.add_edge(e.dependency, e.dependent, ());
        }
        graph
    }

    /// Every task that sits on a dependency cycle (including self edges).
    ///
    /// Diagnostics only; the evaluator detects cycles on its own while
    /// walking.
    pub fn cyclic_tasks(&self) -> HashSet<TaskId> {
        let graph = self.to_graph();
        let mut out = HashSet::new();

        for scc in tarjan_scc(&graph) {
            if scc.len() > 1 {
                out.extend(scc);
            } else if let Some(&only) = scc.first() {
                if graph.contains_edge(only, only) {
                    out.insert(only);
                }
            }
        }

        out
    }
}
