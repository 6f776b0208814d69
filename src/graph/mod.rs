// src/graph/mod.rs

//! Task graph and completion evaluation.
//!
//! - [`deps`] keeps dependency edges as `(dependent, dependency)` pairs.
//! - [`board`] is the arena that owns tasks and exposes every mutator.
//! - [`evaluator`] walks requirements and dependencies for one pass.
//! - [`eligibility`] describes the outcome of a walk.

pub mod board;
pub mod deps;
pub mod eligibility;
pub mod evaluator;

pub use board::{TaskBoard, Toggle};
pub use deps::{DependencyIndex, Edge};
pub use eligibility::{Blocker, Eligibility};
pub use evaluator::Evaluator;
