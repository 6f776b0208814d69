#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use checkdag::config::{
    ConfigSection, NoteConfig, PlanFile, RawPlanFile, RequirementConfig, TaskConfig, TypesSection,
};
use checkdag::graph::TaskBoard;
use checkdag::model::{NewTask, RequirementSpec, TaskId, TypeRegistry};

/// Fixed date used wherever a test does not care about the deadline.
pub fn some_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 5, 1).expect("valid date")
}

/// Builder for `PlanFile` to simplify test setup.
pub struct PlanFileBuilder {
    plan: RawPlanFile,
}

impl PlanFileBuilder {
    pub fn new() -> Self {
        Self {
            plan: RawPlanFile {
                config: ConfigSection::default(),
                types: TypesSection::default(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.plan.task.insert(name.to_string(), task);
        self
    }

    pub fn allow_cycles(mut self, val: bool) -> Self {
        self.plan.config.allow_cycles = val;
        self
    }

    pub fn with_types(mut self, labels: &[&str], default: Option<&str>) -> Self {
        self.plan.types.labels = labels.iter().map(|s| s.to_string()).collect();
        self.plan.types.default = default.map(|s| s.to_string());
        self
    }

    pub fn build_raw(self) -> RawPlanFile {
        self.plan
    }

    pub fn build(self) -> PlanFile {
        PlanFile::try_from(self.plan).expect("Failed to build valid plan from builder")
    }
}

impl Default for PlanFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new() -> Self {
        Self {
            task: TaskConfig {
                details: String::new(),
                deadline: "2017-05-01".to_string(),
                weighting: 0,
                task_type: None,
                checked: false,
                after: vec![],
                requirement: vec![],
                notes: vec![],
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn requirement(mut self, name: &str, complete: bool) -> Self {
        self.task.requirement.push(RequirementConfig {
            name: name.to_string(),
            details: String::new(),
            complete,
        });
        self
    }

    pub fn note(mut self, title: &str, text: &str) -> Self {
        self.task.notes.push(NoteConfig {
            title: title.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn checked(mut self, val: bool) -> Self {
        self.task.checked = val;
        self
    }

    pub fn deadline(mut self, s: &str) -> Self {
        self.task.deadline = s.to_string();
        self
    }

    pub fn weighting(mut self, w: i32) -> Self {
        self.task.weighting = w;
        self
    }

    pub fn task_type(mut self, label: &str) -> Self {
        self.task.task_type = Some(label.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

impl Default for TaskConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct board construction for engine-level tests.
pub struct BoardBuilder {
    board: TaskBoard,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self {
            board: TaskBoard::new(TypeRegistry::builtin()),
        }
    }

    /// Add a task with the given requirement completion states.
    pub fn task(&mut self, name: &str, requirements: &[bool]) -> TaskId {
        let id = self.board.create_task(NewTask::new(name, some_date()));
        for (i, &complete) in requirements.iter().enumerate() {
            self.board
                .add_requirement(id, RequirementSpec::new(format!("{name}-R{}", i + 1), complete))
                .expect("task exists");
        }
        id
    }

    pub fn depends(&mut self, task: TaskId, dependency: TaskId) -> &mut Self {
        self.board
            .add_dependency(task, dependency)
            .expect("tasks exist");
        self
    }

    pub fn board(&mut self) -> &mut TaskBoard {
        &mut self.board
    }

    pub fn build(self) -> TaskBoard {
        self.board
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
