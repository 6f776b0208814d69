// src/graph/board.rs

//! Arena of tasks plus the shared dependency index.
//!
//! The board owns every task (and through them, their requirements and
//! notes). Dependencies are edges in [`DependencyIndex`], never owned by
//! either end. All operations are keyed by [`TaskId`].
//!
//! Structural additions and replacements re-run the eligibility check for
//! the mutated task, which may clear its checked flag. Removals do not: a
//! removal can only make a task more eligible, and a task unchecked earlier
//! stays unchecked until the user toggles it again.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::model::{PlanFile, parse_date};
use crate::errors::{CheckdagError, Result};
use crate::graph::deps::DependencyIndex;
use crate::graph::eligibility::Eligibility;
use crate::graph::evaluator::Evaluator;
use crate::model::{
    NewTask, Note, Requirement, RequirementId, RequirementSpec, Task, TaskId, TypeRegistry,
};

/// Outcome of [`TaskBoard::toggle_complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The task was complete and is now unchecked.
    Unchecked,
    /// The task was eligible and is now checked.
    Checked,
    /// The task is not eligible; nothing changed.
    Rejected,
}

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    pub(crate) tasks: BTreeMap<TaskId, Task>,
    pub(crate) deps: DependencyIndex,
    registry: TypeRegistry,
    next_task: u64,
    next_requirement: u64,
}

impl TaskBoard {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            tasks: BTreeMap::new(),
            deps: DependencyIndex::new(),
            registry,
            next_task: 0,
            next_requirement: 0,
        }
    }

    /// Build a board from a validated plan.
    ///
    /// Tasks are created in plan order, then requirements, notes and
    /// dependencies are attached, and finally the `checked` flags are
    /// applied with [`TaskBoard::set_complete`]. A flag that violates
    /// eligibility is cleared by the first evaluation that reaches it.
    pub fn from_plan(plan: &PlanFile) -> Result<Self> {
        let mut board = Self::new(plan.registry().clone());
        let mut ids: HashMap<&str, TaskId> = HashMap::new();
        let mut created = Vec::with_capacity(plan.tasks().len());

        for (name, tc) in plan.tasks().iter() {
            let deadline = parse_date(&tc.deadline).ok_or_else(|| {
                CheckdagError::ConfigError(format!(
                    "task '{}' has invalid deadline '{}'",
                    name, tc.deadline
                ))
            })?;
            let new = NewTask {
                name: name.clone(),
                details: tc.details.clone(),
                deadline,
                weighting: tc.weighting,
                type_label: tc.task_type.clone().unwrap_or_default(),
            };
            let id = board.create_task(new);
            ids.insert(name.as_str(), id);
            created.push((id, name, tc));
        }

        for &(id, name, tc) in created.iter() {

            let specs = tc
                .requirement
                .iter()
                .map(|r| RequirementSpec {
                    name: r.name.clone(),
                    details: r.details.clone(),
                    complete: r.complete,
                })
                .collect();
            board.replace_requirements(id, specs)?;

            for note in tc.notes.iter() {
                board.add_note(
                    id,
                    Note {
                        title: note.title.clone(),
                        text: note.text.clone(),
                    },
                )?;
            }

            let mut deps = Vec::with_capacity(tc.after.len());
            for dep in tc.after.iter() {
                let dep_id = ids.get(dep.as_str()).copied().ok_or_else(|| {
                    CheckdagError::ConfigError(format!(
                        "task '{}' has unknown dependency '{}' in `after`",
                        name, dep
                    ))
                })?;
                deps.push(dep_id);
            }
            board.replace_dependencies(id, &deps)?;
        }

        for &(id, _, tc) in created.iter() {
            if tc.checked {
                board.set_complete(id, true)?;
            }
        }

        debug!(tasks = board.len(), edges = board.deps.edge_count(), "board built from plan");
        Ok(board)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn dependency_index(&self) -> &DependencyIndex {
        &self.deps
    }

    /// Start a fresh evaluation pass. Results are only valid until the next
    /// mutation.
    pub fn evaluator(&mut self) -> Evaluator<'_> {
        Evaluator::new(self)
    }

    // --- lifecycle -------------------------------------------------------

    /// Create a task in the unchecked state with no requirements and no
    /// dependencies.
    pub fn create_task(&mut self, new: NewTask) -> TaskId {
        self.next_task += 1;
        let id = TaskId(self.next_task);
        let task = Task::new(id, new, &self.registry);
        debug!(task = %task.name(), id = %id, kind = %task.task_type(), "task created");
        self.tasks.insert(id, task);
        id
    }

    /// Remove a task and every dependency edge that touches it.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let task = self.tasks.remove(&id)?;
        let dropped = self.deps.drop_task(id);
        debug!(task = %task.name(), edges = dropped, "task removed");
        Some(task)
    }

    pub fn task(&self, id: TaskId) -> Result<&Task> {
        self.tasks.get(&id).ok_or(CheckdagError::TaskNotFound(id))
    }

    /// Mutable access for plain attribute setters (name, details, notes).
    pub fn task_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks.get_mut(&id).ok_or(CheckdagError::TaskNotFound(id))
    }

    /// All tasks in creation order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// First task (in creation order) whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<TaskId> {
        self.tasks
            .values()
            .find(|t| t.name() == name)
            .map(|t| t.id())
    }

    // --- completion ------------------------------------------------------

    pub fn is_complete(&mut self, id: TaskId) -> Result<bool> {
        self.ensure(id)?;
        Ok(self.evaluator().is_complete(id))
    }

    /// Read-only display alias of [`TaskBoard::is_complete`].
    pub fn is_checked_complete(&mut self, id: TaskId) -> Result<bool> {
        self.is_complete(id)
    }

    pub fn can_check_complete(&mut self, id: TaskId) -> Result<bool> {
        self.ensure(id)?;
        Ok(self.evaluator().can_check_complete(id))
    }

    pub fn eligibility(&mut self, id: TaskId) -> Result<Eligibility> {
        self.ensure(id)?;
        Ok(self.evaluator().eligibility(id))
    }

    pub fn dependencies_complete(&mut self, id: TaskId) -> Result<bool> {
        self.ensure(id)?;
        Ok(self.evaluator().dependencies_complete(id))
    }

    /// Uncheck a complete task, or check an eligible one.
    ///
    /// An ineligible task is left as it is and [`Toggle::Rejected`] is
    /// returned.
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<Toggle> {
        self.ensure(id)?;
        let mut eval = self.evaluator();

        let outcome = if eval.is_complete(id) {
            Toggle::Unchecked
        } else if eval.can_check_complete(id) {
            Toggle::Checked
        } else {
            Toggle::Rejected
        };

        match outcome {
            Toggle::Unchecked => self.set_checked(id, false),
            Toggle::Checked => self.set_checked(id, true),
            Toggle::Rejected => {
                debug!(id = %id, "toggle rejected; task not eligible");
            }
        }

        Ok(outcome)
    }

    /// Set the checked flag without looking at eligibility.
    ///
    /// Meant for bulk loading and administrative fixes; the next evaluation
    /// clears the flag again if the task is not eligible.
    pub fn set_complete(&mut self, id: TaskId, complete: bool) -> Result<()> {
        self.ensure(id)?;
        self.set_checked(id, complete);
        Ok(())
    }

    // --- requirements ----------------------------------------------------

    pub fn add_requirement(&mut self, id: TaskId, spec: RequirementSpec) -> Result<RequirementId> {
        self.ensure(id)?;
        let req = self.make_requirement(spec);
        let req_id = req.id();
        if let Some(task) = self.tasks.get_mut(&id) {
            task.push_requirement(req);
        }
        self.recheck(id);
        Ok(req_id)
    }

    pub fn replace_requirements(
        &mut self,
        id: TaskId,
        specs: Vec<RequirementSpec>,
    ) -> Result<Vec<RequirementId>> {
        self.ensure(id)?;
        let reqs: Vec<Requirement> = specs
            .into_iter()
            .map(|spec| self.make_requirement(spec))
            .collect();
        let ids = reqs.iter().map(|r| r.id()).collect();
        if let Some(task) = self.tasks.get_mut(&id) {
            task.replace_requirements(reqs);
        }
        self.recheck(id);
        Ok(ids)
    }

    /// Returns `false` if the task did not own this requirement.
    pub fn remove_requirement(&mut self, id: TaskId, req: RequirementId) -> Result<bool> {
        Ok(self.task_mut(id)?.remove_requirement(req))
    }

    /// Flip a requirement's own completion. Not a structural change: the
    /// owning task is re-evaluated lazily on its next read.
    pub fn set_requirement_complete(
        &mut self,
        id: TaskId,
        req: RequirementId,
        complete: bool,
    ) -> Result<bool> {
        match self.task_mut(id)?.requirement_mut(req) {
            Some(r) => {
                r.set_complete(complete);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn contains_requirement(&self, id: TaskId, req: RequirementId) -> Result<bool> {
        Ok(self.task(id)?.contains_requirement(req))
    }

    pub fn requirements(&self, id: TaskId) -> Result<&[Requirement]> {
        Ok(self.task(id)?.requirements())
    }

    // --- dependencies ----------------------------------------------------

    pub fn add_dependency(&mut self, id: TaskId, dependency: TaskId) -> Result<()> {
        self.ensure(id)?;
        self.ensure(dependency)?;
        if id == dependency {
            warn!(id = %id, "task added as its own dependency; it can never be completed");
        }
        self.deps.add(id, dependency);
        self.recheck(id);
        Ok(())
    }

    pub fn replace_dependencies(&mut self, id: TaskId, dependencies: &[TaskId]) -> Result<()> {
        self.ensure(id)?;
        for &dep in dependencies {
            self.ensure(dep)?;
        }
        self.deps.replace_for(id, dependencies);
        self.recheck(id);
        Ok(())
    }

    /// Returns `false` if `dependency` was not a dependency of `id`.
    pub fn remove_dependency(&mut self, id: TaskId, dependency: TaskId) -> Result<bool> {
        self.ensure(id)?;
        Ok(self.deps.remove_first(id, dependency))
    }

    pub fn contains_dependency(&self, id: TaskId, dependency: TaskId) -> Result<bool> {
        self.ensure(id)?;
        Ok(self.deps.contains(id, dependency))
    }

    pub fn has_dependencies(&self, id: TaskId) -> Result<bool> {
        self.ensure(id)?;
        Ok(self.deps.has_dependencies(id))
    }

    /// Direct dependencies in insertion order.
    pub fn dependencies(&self, id: TaskId) -> Result<Vec<TaskId>> {
        self.ensure(id)?;
        Ok(self.deps.dependencies_of(id).to_vec())
    }

    /// Tasks that depend directly on `id`.
    pub fn dependents(&self, id: TaskId) -> Result<Vec<TaskId>> {
        self.ensure(id)?;
        Ok(self.deps.dependents_of(id))
    }

    // --- attributes ------------------------------------------------------

    /// Apply a type label. Unknown labels are ignored and `false` returned.
    pub fn set_type(&mut self, id: TaskId, label: &str) -> Result<bool> {
        self.ensure(id)?;
        let Some(task_type) = self.registry.get(label) else {
            debug!(id = %id, label, "unknown task type label; ignoring");
            return Ok(false);
        };
        self.task_mut(id)?.set_type(task_type);
        Ok(true)
    }

    pub fn set_deadline(&mut self, id: TaskId, date: NaiveDate) -> Result<()> {
        self.task_mut(id)?.set_deadline(date);
        Ok(())
    }

    pub fn set_weighting(&mut self, id: TaskId, weighting: i32) -> Result<()> {
        self.task_mut(id)?.set_weighting(weighting);
        Ok(())
    }

    pub fn add_note(&mut self, id: TaskId, note: Note) -> Result<()> {
        self.task_mut(id)?.add_note(note);
        Ok(())
    }

    // --- internals -------------------------------------------------------

    fn ensure(&self, id: TaskId) -> Result<()> {
        if self.tasks.contains_key(&id) {
            Ok(())
        } else {
            Err(CheckdagError::TaskNotFound(id))
        }
    }

    fn make_requirement(&mut self, spec: RequirementSpec) -> Requirement {
        self.next_requirement += 1;
        Requirement::new(
            RequirementId(self.next_requirement),
            spec.name,
            spec.details,
            spec.complete,
        )
    }

    fn set_checked(&mut self, id: TaskId, checked: bool) {
        if let Some(task) = self.tasks.get_mut(&id) {
            if task.checked_flag() != checked {
                debug!(task = %task.name(), checked, "checked flag changed");
            }
            task.set_checked(checked);
        }
    }

    /// Re-run eligibility after a structural change; clears the flag if the
    /// task is no longer eligible.
    fn recheck(&mut self, id: TaskId) {
        let eligible = self.evaluator().can_check_complete(id);
        debug!(id = %id, eligible, "re-evaluated after structural change");
    }
}
