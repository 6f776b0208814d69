// src/model/task_type.rs

//! Closed set of task category labels.
//!
//! Labels are matched trimmed and case-insensitively; the registry hands back
//! the canonical spelling it was built with.

use std::fmt;

use tracing::debug;

/// Labels used when a plan file does not declare its own `[types]`.
pub const BUILTIN_TYPES: &[&str] = &[
    "Other",
    "Reading",
    "Writing",
    "Research",
    "Exam",
    "Coursework",
    "Revision",
    "Meeting",
];

pub const BUILTIN_DEFAULT_TYPE: &str = "Other";

/// Canonical label of a registered type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskType(String);

impl TaskType {
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TypeRegistry {
    labels: Vec<String>,
    default: TaskType,
}

impl TypeRegistry {
    /// Build a registry from canonical labels.
    ///
    /// Returns `None` when `default` is not one of `labels`.
    pub fn new<I, S>(labels: I, default: &str) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label: String = label.into();
            let label = label.trim().to_string();
            if label.is_empty() || out.iter().any(|l| same_label(l, &label)) {
                continue;
            }
            out.push(label);
        }

        let default = out
            .iter()
            .find(|l| same_label(l, default))
            .cloned()
            .map(TaskType)?;

        Some(Self {
            labels: out,
            default,
        })
    }

    pub fn builtin() -> Self {
        Self {
            labels: BUILTIN_TYPES.iter().map(|s| s.to_string()).collect(),
            default: TaskType(BUILTIN_DEFAULT_TYPE.to_string()),
        }
    }

    pub fn exists(&self, label: &str) -> bool {
        self.labels.iter().any(|l| same_label(l, label))
    }

    pub fn get(&self, label: &str) -> Option<TaskType> {
        self.labels
            .iter()
            .find(|l| same_label(l, label))
            .cloned()
            .map(TaskType)
    }

    pub fn default_type(&self) -> &TaskType {
        &self.default
    }

    /// Used at construction time only: unknown labels fall back to the default.
    pub fn resolve_or_default(&self, label: &str) -> TaskType {
        match self.get(label) {
            Some(t) => t,
            None => {
                debug!(label, default = %self.default, "unknown task type; using default");
                self.default.clone()
            }
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn same_label(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
