// src/model/mod.rs

//! Entities the completion engine evaluates.
//!
//! - [`task`] holds the `Task` record and its construction parameters.
//! - [`requirement`] holds the leaf items a task owns, plus notes.
//! - [`deadline`] wraps a calendar date under the stored timestamp convention.
//! - [`task_type`] is the closed set of category labels and its registry.

pub mod deadline;
pub mod requirement;
pub mod task;
pub mod task_type;

use std::fmt;

pub use deadline::Deadline;
pub use requirement::{Note, Requirement, RequirementSpec};
pub use task::{NewTask, Task};
pub use task_type::{TaskType, TypeRegistry};

/// Stable handle of a task inside a [`crate::graph::TaskBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Stable handle of a requirement, unique across the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequirementId(pub(crate) u64);

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "requirement#{}", self.0)
    }
}
