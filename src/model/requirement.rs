// src/model/requirement.rs

use crate::model::RequirementId;

/// A leaf item owned by a task. The engine only ever asks whether it is
/// complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    id: RequirementId,
    pub name: String,
    pub details: String,
    complete: bool,
}

impl Requirement {
    pub(crate) fn new(id: RequirementId, name: String, details: String, complete: bool) -> Self {
        Self {
            id,
            name,
            details,
            complete,
        }
    }

    pub fn id(&self) -> RequirementId {
        self.id
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }
}

/// Requirement contents before the board assigns an id.
///
/// This is what callers hand to `add_requirement` / `replace_requirements`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSpec {
    pub name: String,
    pub details: String,
    pub complete: bool,
}

impl RequirementSpec {
    pub fn new(name: impl Into<String>, complete: bool) -> Self {
        Self {
            name: name.into(),
            details: String::new(),
            complete,
        }
    }
}

/// Free-text note attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub text: String,
}
