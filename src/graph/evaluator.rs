// src/graph/evaluator.rs

//! Completion eligibility walk.
//!
//! A task is eligible to be checked complete when every requirement it owns
//! is complete and every direct dependency is complete, where "complete"
//! means eligible *and* checked. That definition is transitive, so one
//! question about a task can walk a large part of the board.
//!
//! The walk is an iterative depth-first traversal with an explicit frame
//! stack and an on-path set:
//!
//! - requirements are checked before dependencies, first failure wins;
//! - dependencies are visited in insertion order, first failure wins;
//! - reaching a task that is already on the current path is a cycle, and the
//!   dependency is treated as incomplete;
//! - a failure unwinds the whole path, since every task on it depends on the
//!   one that failed.
//!
//! Every task found ineligible has its checked flag cleared. Eligible tasks
//! keep whatever the user set.
//!
//! Results are memoised for the lifetime of one [`Evaluator`] only. Build a
//! fresh evaluator after any mutation.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use crate::graph::board::TaskBoard;
use crate::graph::eligibility::{Blocker, Eligibility};
use crate::model::TaskId;

/// One task being walked: its dependencies and how far we got.
struct Frame {
    task: TaskId,
    deps: Vec<TaskId>,
    next: usize,
}

/// A single evaluation pass over a board.
pub struct Evaluator<'a> {
    board: &'a mut TaskBoard,
    memo: HashMap<TaskId, Eligibility>,
}

impl<'a> Evaluator<'a> {
    pub fn new(board: &'a mut TaskBoard) -> Self {
        Self {
            board,
            memo: HashMap::new(),
        }
    }

    /// `true` iff the task is eligible and the user has checked it.
    pub fn is_complete(&mut self, task: TaskId) -> bool {
        self.eligibility(task).is_eligible() && self.checked(task)
    }

    /// Eligibility test. Clears the checked flag of every ineligible task it
    /// reaches.
    pub fn can_check_complete(&mut self, task: TaskId) -> bool {
        self.eligibility(task).is_eligible()
    }

    /// `true` iff every direct dependency of `task` is complete.
    pub fn dependencies_complete(&mut self, task: TaskId) -> bool {
        let deps = self.board.deps.dependencies_of(task).to_vec();
        deps.into_iter().all(|dep| self.is_complete(dep))
    }

    /// Full eligibility result for `task`, including the first blocker.
    pub fn eligibility(&mut self, root: TaskId) -> Eligibility {
        if let Some(&known) = self.memo.get(&root) {
            return known;
        }
        if let Some(blocked) = self.check_requirements(root) {
            return blocked;
        }

        let mut on_path: HashSet<TaskId> = HashSet::new();
        let mut stack: Vec<Frame> = Vec::new();
        on_path.insert(root);
        stack.push(self.frame(root));

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let task = frame.task;

            let Some(dep) = frame.deps.get(frame.next).copied() else {
                // Every dependency of `task` passed.
                stack.pop();
                on_path.remove(&task);
                self.memo.insert(task, Eligibility::Eligible);
                trace!(task = %task, "eligible");

                if stack.is_empty() {
                    break;
                }
                if self.checked(task) {
                    if let Some(parent) = stack.last_mut() {
                        parent.next += 1;
                    }
                } else {
                    self.unwind(&mut stack, &mut on_path, Blocker::Dependency(task), None);
                }
                continue;
            };

            if on_path.contains(&dep) {
                let cycle_start = stack.iter().position(|f| f.task == dep);
                debug!(task = %task, dependency = %dep, "dependency cycle reached");
                self.unwind(&mut stack, &mut on_path, Blocker::Cycle(dep), cycle_start);
            } else if let Some(known) = self.memo.get(&dep).copied() {
                if known.is_eligible() && self.checked(dep) {
                    frame.next += 1;
                } else {
                    self.unwind(&mut stack, &mut on_path, Blocker::Dependency(dep), None);
                }
            } else if self.check_requirements(dep).is_some() {
                self.unwind(&mut stack, &mut on_path, Blocker::Dependency(dep), None);
            } else {
                on_path.insert(dep);
                let next = self.frame(dep);
                stack.push(next);
            }
        }

        self.memo
            .get(&root)
            .copied()
            .unwrap_or(Eligibility::Blocked(Blocker::Dependency(root)))
    }

    fn frame(&self, task: TaskId) -> Frame {
        Frame {
            task,
            deps: self.board.deps.dependencies_of(task).to_vec(),
            next: 0,
        }
    }

    fn checked(&self, task: TaskId) -> bool {
        self.board
            .tasks
            .get(&task)
            .is_some_and(|t| t.checked_flag())
    }

    /// Requirement phase. Returns the blocked result if it failed.
    fn check_requirements(&mut self, task: TaskId) -> Option<Eligibility> {
        let Some(info) = self.board.tasks.get(&task) else {
            warn!(task = %task, "dependency refers to a task that is not on the board");
            let blocked = Eligibility::Blocked(Blocker::Dependency(task));
            self.memo.insert(task, blocked);
            return Some(blocked);
        };

        let req = info.first_incomplete_requirement()?;
        self.block(task, Blocker::Requirement(req));
        self.memo.get(&task).copied()
    }

    /// Fail every frame on the path, innermost first.
    ///
    /// Frames at or above `cycle_start` are part of the cycle and report it
    /// as such; frames below only see a failed dependency.
    fn unwind(
        &mut self,
        stack: &mut Vec<Frame>,
        on_path: &mut HashSet<TaskId>,
        first: Blocker,
        cycle_start: Option<usize>,
    ) {
        let mut blocker = first;
        while let Some(frame) = stack.pop() {
            on_path.remove(&frame.task);
            self.block(frame.task, blocker);

            let idx = stack.len();
            blocker = match cycle_start {
                Some(start) if idx > start => Blocker::Cycle(frame.task),
                _ => Blocker::Dependency(frame.task),
            };
        }
    }

    fn block(&mut self, task: TaskId, blocker: Blocker) {
        self.memo.insert(task, Eligibility::Blocked(blocker));

        if let Some(info) = self.board.tasks.get_mut(&task) {
            if info.checked_flag() {
                debug!(
                    task = %info.name(),
                    ?blocker,
                    "task no longer eligible; clearing checked flag"
                );
                info.set_checked(false);
            }
        }
    }
}
