// src/report.rs

//! Per-task status lines for display.
//!
//! All lines are produced in a single evaluation pass, so tasks that share
//! dependencies are only walked once.

use std::fmt;

use crate::errors::{CheckdagError, Result};
use crate::graph::{Blocker, Eligibility, TaskBoard};
use crate::model::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Eligible and checked.
    Complete,
    /// Eligible, waiting for the user to check it.
    Ready,
    /// Not eligible.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub id: TaskId,
    pub name: String,
    pub state: TaskState,
    /// Human-readable reason when `state == Blocked`.
    pub reason: Option<String>,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.state {
            TaskState::Complete => "[x]",
            TaskState::Ready | TaskState::Blocked => "[ ]",
        };
        write!(f, "{mark} {}", self.name)?;
        if let Some(ref reason) = self.reason {
            write!(f, " (blocked: {reason})")?;
        }
        Ok(())
    }
}

/// Status of every task on the board, in creation order.
pub fn status_report(board: &mut TaskBoard) -> Vec<StatusLine> {
    let ids: Vec<TaskId> = board.tasks().map(|t| t.id()).collect();
    status_lines(board, &ids)
}

/// Status of a single task.
pub fn status_of(board: &mut TaskBoard, id: TaskId) -> Result<StatusLine> {
    board.task(id)?;
    status_lines(board, &[id])
        .into_iter()
        .next()
        .ok_or(CheckdagError::TaskNotFound(id))
}

fn status_lines(board: &mut TaskBoard, ids: &[TaskId]) -> Vec<StatusLine> {
    let mut verdicts = Vec::with_capacity(ids.len());
    {
        let mut eval = board.evaluator();
        for &id in ids {
            let eligibility = eval.eligibility(id);
            let complete = eval.is_complete(id);
            verdicts.push((id, eligibility, complete));
        }
    }

    verdicts
        .into_iter()
        .map(|(id, eligibility, complete)| {
            let name = board
                .task(id)
                .map(|t| t.name().to_string())
                .unwrap_or_else(|_| id.to_string());
            let (state, reason) = match eligibility {
                Eligibility::Eligible if complete => (TaskState::Complete, None),
                Eligibility::Eligible => (TaskState::Ready, None),
                Eligibility::Blocked(blocker) => {
                    (TaskState::Blocked, Some(describe_blocker(board, id, blocker)))
                }
            };
            StatusLine {
                id,
                name,
                state,
                reason,
            }
        })
        .collect()
}

/// Render a blocker using task and requirement names.
pub fn describe_blocker(board: &TaskBoard, task: TaskId, blocker: Blocker) -> String {
    let task_name = |id: TaskId| {
        board
            .task(id)
            .map(|t| t.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    };

    match blocker {
        Blocker::Requirement(req) => {
            let name = board
                .task(task)
                .ok()
                .and_then(|t| t.requirements().iter().find(|r| r.id() == req))
                .map(|r| r.name.clone())
                .unwrap_or_else(|| req.to_string());
            format!("requirement '{name}' incomplete")
        }
        Blocker::Dependency(dep) => format!("dependency '{}' incomplete", task_name(dep)),
        Blocker::Cycle(dep) => format!("dependency cycle through '{}'", task_name(dep)),
    }
}
