// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! The evaluator itself never fails on graph shape; these variants cover
//! plan loading and API misuse (ids that do not belong to the board).

use thiserror::Error;

use crate::model::TaskId;

#[derive(Error, Debug)]
pub enum CheckdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Cycle detected in task graph: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CheckdagError>;
