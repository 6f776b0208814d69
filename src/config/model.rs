// src/config/model.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::TypeRegistry;
use crate::model::task_type::BUILTIN_DEFAULT_TYPE;

/// Plan file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// allow_cycles = true
///
/// [types]
/// labels = ["Reading", "Writing", "Other"]
/// default = "Other"
///
/// [task."Write report"]
/// deadline = "2017-05-01"
/// weighting = 10
/// type = "Writing"
///
///   [[task."Write report".requirement]]
///   name = "Outline"
///   complete = true
///
/// [task."Submit report"]
/// deadline = "2017-05-02"
/// after = ["Write report"]
/// ```
///
/// All sections are optional; a plan without tasks is rejected during
/// validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlanFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub types: TypesSection,

    /// Keys are task names.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// When `false`, a plan whose `after` lists form a cycle is rejected at
    /// load time. When `true` (default) it loads, and the tasks on the cycle
    /// simply never become eligible.
    #[serde(default = "default_allow_cycles")]
    pub allow_cycles: bool,
}

fn default_allow_cycles() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            allow_cycles: default_allow_cycles(),
        }
    }
}

/// `[types]` section. An empty `labels` list means the built-in set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypesSection {
    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub default: Option<String>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    #[serde(default)]
    pub details: String,

    /// `YYYY-MM-DD` or `DD/MM/YYYY`.
    pub deadline: String,

    #[serde(default)]
    pub weighting: i32,

    /// Type label; unknown labels fall back to the registry default.
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,

    /// Initial checked flag. Applied without an eligibility check, then
    /// corrected by the first evaluation.
    #[serde(default)]
    pub checked: bool,

    /// Names of the tasks this one depends on.
    #[serde(default)]
    pub after: Vec<String>,

    #[serde(default)]
    pub requirement: Vec<RequirementConfig>,

    #[serde(default)]
    pub notes: Vec<NoteConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequirementConfig {
    pub name: String,

    #[serde(default)]
    pub details: String,

    #[serde(default)]
    pub complete: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteConfig {
    pub title: String,

    #[serde(default)]
    pub text: String,
}

/// A plan that passed validation. Construct through
/// `PlanFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct PlanFile {
    config: ConfigSection,
    registry: TypeRegistry,
    task: BTreeMap<String, TaskConfig>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        registry: TypeRegistry,
        task: BTreeMap<String, TaskConfig>,
    ) -> Self {
        Self {
            config,
            registry,
            task,
        }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn tasks(&self) -> &BTreeMap<String, TaskConfig> {
        &self.task
    }
}

impl TypesSection {
    /// Registry described by this section, or `None` if the default label is
    /// not among the labels.
    pub fn registry(&self) -> Option<TypeRegistry> {
        if self.labels.is_empty() {
            return match self.default {
                Some(ref d) => TypeRegistry::new(
                    crate::model::task_type::BUILTIN_TYPES.iter().copied(),
                    d,
                ),
                None => Some(TypeRegistry::builtin()),
            };
        }

        let default = match self.default {
            Some(ref d) => d.as_str(),
            None if self
                .labels
                .iter()
                .any(|l| l.trim().eq_ignore_ascii_case(BUILTIN_DEFAULT_TYPE)) =>
            {
                BUILTIN_DEFAULT_TYPE
            }
            None => self.labels[0].as_str(),
        };

        TypeRegistry::new(self.labels.iter().cloned(), default)
    }
}

/// Parse a deadline written as `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}
