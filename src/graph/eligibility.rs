// src/graph/eligibility.rs

use crate::model::{RequirementId, TaskId};

/// Why a task cannot be checked complete: the first failure found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    /// A local requirement is not complete.
    Requirement(RequirementId),
    /// A direct dependency is not complete.
    Dependency(TaskId),
    /// Walking this direct dependency led back onto the current path.
    Cycle(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Blocked(Blocker),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn blocker(&self) -> Option<Blocker> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::Blocked(b) => Some(*b),
        }
    }
}
