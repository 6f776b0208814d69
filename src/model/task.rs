// src/model/task.rs

use std::fmt;

use chrono::NaiveDate;

use crate::model::{Deadline, Note, Requirement, RequirementId, TaskId, TaskType, TypeRegistry};

/// Construction parameters for a task, as supplied by the persistence side.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub details: String,
    pub deadline: NaiveDate,
    pub weighting: i32,
    pub type_label: String,
}

impl NewTask {
    pub fn new(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            details: String::new(),
            deadline,
            weighting: 0,
            type_label: String::new(),
        }
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn weighting(mut self, weighting: i32) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn type_label(mut self, label: impl Into<String>) -> Self {
        self.type_label = label.into();
        self
    }
}

/// A unit of work.
///
/// Dependencies are not stored here: they are edges in the board's
/// [`crate::graph::DependencyIndex`], since a task never owns the tasks it
/// depends on.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    name: String,
    details: String,
    deadline: Deadline,
    weighting: i32,
    task_type: TaskType,
    requirements: Vec<Requirement>,
    notes: Vec<Note>,
    /// The user's explicit "done" mark. Everything else about completion is
    /// derived.
    checked_complete: bool,
}

impl Task {
    pub(crate) fn new(id: TaskId, new: NewTask, registry: &TypeRegistry) -> Self {
        Self {
            id,
            task_type: registry.resolve_or_default(&new.type_label),
            name: new.name,
            details: new.details,
            deadline: Deadline::new(new.deadline),
            weighting: new.weighting,
            requirements: Vec::new(),
            notes: Vec::new(),
            checked_complete: false,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    pub fn weighting(&self) -> i32 {
        self.weighting
    }

    pub fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Raw flag, without checking eligibility. Use the board's
    /// `is_complete` for the derived answer.
    pub fn checked_flag(&self) -> bool {
        self.checked_complete
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_details(&mut self, details: impl Into<String>) {
        self.details = details.into();
    }

    pub fn set_deadline(&mut self, date: NaiveDate) {
        self.deadline.set_date(date);
    }

    pub fn set_weighting(&mut self, weighting: i32) {
        self.weighting = weighting;
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub(crate) fn set_type(&mut self, task_type: TaskType) {
        self.task_type = task_type;
    }

    pub(crate) fn set_checked(&mut self, checked: bool) {
        self.checked_complete = checked;
    }

    pub(crate) fn push_requirement(&mut self, req: Requirement) {
        self.requirements.push(req);
    }

    pub(crate) fn replace_requirements(&mut self, reqs: Vec<Requirement>) {
        self.requirements = reqs;
    }

    pub(crate) fn remove_requirement(&mut self, id: RequirementId) -> bool {
        match self.requirements.iter().position(|r| r.id() == id) {
            Some(pos) => {
                self.requirements.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn requirement_mut(&mut self, id: RequirementId) -> Option<&mut Requirement> {
        self.requirements.iter_mut().find(|r| r.id() == id)
    }

    pub fn contains_requirement(&self, id: RequirementId) -> bool {
        self.requirements.iter().any(|r| r.id() == id)
    }

    /// First requirement that is not complete, in list order.
    pub fn first_incomplete_requirement(&self) -> Option<RequirementId> {
        self.requirements
            .iter()
            .find(|r| !r.is_complete())
            .map(|r| r.id())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
