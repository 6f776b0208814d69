// src/config/mod.rs

//! Plan file loading and validation for checkdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a plan file from disk (`loader.rs`).
//! - Validate references, types and dates (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ConfigSection, NoteConfig, PlanFile, RawPlanFile, RequirementConfig, TaskConfig, TypesSection,
    parse_date,
};
