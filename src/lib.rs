// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod model;
pub mod report;

use std::io::Write;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::PlanFile;
use crate::config::loader::load_and_validate;
use crate::errors::CheckdagError;
use crate::graph::{TaskBoard, Toggle};
use crate::report::{describe_blocker, status_of, status_report};

/// High-level entry point used by `main.rs`. Writes the report to stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(&args, &mut out)
}

/// Same as [`run`], with the report written to `out`.
///
/// This wires together:
/// - plan loading and validation
/// - board construction
/// - `--toggle` application, in order
/// - the status report (one task with `--task`, otherwise all)
pub fn run_with_output(args: &CliArgs, out: &mut impl Write) -> Result<()> {
    let plan = load_and_validate(&args.plan)?;

    if args.dry_run {
        print_dry_run(&plan, out)?;
        return Ok(());
    }

    let mut board = TaskBoard::from_plan(&plan)?;
    let cyclic = board.dependency_index().cyclic_tasks();
    if !cyclic.is_empty() {
        warn!(count = cyclic.len(), "tasks on dependency cycles can never be completed");
    }

    for name in args.toggle.iter() {
        apply_toggle(&mut board, name, out)?;
    }

    match args.task {
        Some(ref name) => {
            let id = board.find_by_name(name).ok_or_else(|| {
                CheckdagError::ConfigError(format!("no task named '{name}' in plan"))
            })?;
            writeln!(out, "{}", status_of(&mut board, id)?)?;
        }
        None => {
            for line in status_report(&mut board) {
                writeln!(out, "{line}")?;
            }
        }
    }

    Ok(())
}

fn apply_toggle(board: &mut TaskBoard, name: &str, out: &mut impl Write) -> Result<()> {
    let Some(id) = board.find_by_name(name) else {
        warn!(task = %name, "toggle for unknown task; ignoring");
        return Ok(());
    };

    match board.toggle_complete(id)? {
        Toggle::Checked => info!(task = %name, "checked complete"),
        Toggle::Unchecked => info!(task = %name, "unchecked"),
        Toggle::Rejected => {
            let reason = board
                .eligibility(id)?
                .blocker()
                .map(|b| describe_blocker(board, id, b))
                .unwrap_or_else(|| "not eligible".to_string());
            writeln!(out, "cannot check '{name}': {reason}")?;
        }
    }
    Ok(())
}

/// Print tasks, deadlines, requirements and dependencies.
fn print_dry_run(plan: &PlanFile, out: &mut impl Write) -> Result<()> {
    writeln!(out, "checkdag dry-run")?;
    writeln!(out, "  config.allow_cycles = {}", plan.config().allow_cycles)?;
    let labels: Vec<&str> = plan.registry().labels().collect();
    writeln!(
        out,
        "  types = {:?} (default {})",
        labels,
        plan.registry().default_type()
    )?;
    writeln!(out)?;

    writeln!(out, "tasks ({}):", plan.tasks().len())?;
    for (name, task) in plan.tasks().iter() {
        writeln!(out, "  - {name}")?;
        writeln!(out, "      deadline: {}", task.deadline)?;
        if task.weighting != 0 {
            writeln!(out, "      weighting: {}", task.weighting)?;
        }
        if let Some(ref label) = task.task_type {
            writeln!(out, "      type: {}", plan.registry().resolve_or_default(label))?;
        }
        if !task.requirement.is_empty() {
            let reqs: Vec<String> = task
                .requirement
                .iter()
                .map(|r| format!("{}{}", r.name, if r.complete { " (done)" } else { "" }))
                .collect();
            writeln!(out, "      requirements: {:?}", reqs)?;
        }
        if !task.after.is_empty() {
            writeln!(out, "      after: {:?}", task.after)?;
        }
        if task.checked {
            writeln!(out, "      checked: true")?;
        }
    }

    debug!("dry-run complete (no evaluation)");
    Ok(())
}
