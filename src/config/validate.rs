// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::{PlanFile, RawPlanFile, parse_date};
use crate::errors::{CheckdagError, Result};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = CheckdagError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plan(&raw)?;
        let registry = raw.types.registry().ok_or_else(|| {
            CheckdagError::ConfigError("[types].default must be one of [types].labels".to_string())
        })?;
        Ok(PlanFile::new_unchecked(raw.config, registry, raw.task))
    }
}

fn validate_raw_plan(plan: &RawPlanFile) -> Result<()> {
    ensure_has_tasks(plan)?;
    validate_types(plan)?;
    validate_deadlines(plan)?;
    validate_task_dependencies(plan)?;
    validate_cycles(plan)?;
    Ok(())
}

fn ensure_has_tasks(plan: &RawPlanFile) -> Result<()> {
    if plan.task.is_empty() {
        return Err(CheckdagError::ConfigError(
            "plan must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_types(plan: &RawPlanFile) -> Result<()> {
    if plan.types.labels.iter().any(|l| l.trim().is_empty()) {
        return Err(CheckdagError::ConfigError(
            "[types].labels must not contain empty labels".to_string(),
        ));
    }
    Ok(())
}

fn validate_deadlines(plan: &RawPlanFile) -> Result<()> {
    for (name, task) in plan.task.iter() {
        if parse_date(&task.deadline).is_none() {
            return Err(CheckdagError::ConfigError(format!(
                "task '{}' has invalid deadline '{}' (expected YYYY-MM-DD or DD/MM/YYYY)",
                name, task.deadline
            )));
        }
    }
    Ok(())
}

fn validate_task_dependencies(plan: &RawPlanFile) -> Result<()> {
    for (name, task) in plan.task.iter() {
        for dep in task.after.iter() {
            if !plan.task.contains_key(dep) {
                return Err(CheckdagError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
            if dep == name {
                warn!(task = %name, "task depends on itself; it can never be completed");
            }
        }
    }
    Ok(())
}

fn validate_cycles(plan: &RawPlanFile) -> Result<()> {
    // Edge direction: dep -> task
    // For:
    //   [task.B]
    //   after = ["A"]
    // we add edge A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in plan.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in plan.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    // A topological sort fails on any cycle, self edges included.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            if plan.config.allow_cycles {
                warn!(
                    task = %node,
                    "plan contains a dependency cycle; tasks on it can never be completed"
                );
                Ok(())
            } else {
                Err(CheckdagError::DagCycle(format!(
                    "cycle detected in task graph involving task '{}'",
                    node
                )))
            }
        }
    }
}
