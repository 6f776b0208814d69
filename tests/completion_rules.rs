use std::error::Error;

use checkdag::graph::{Blocker, Eligibility, Toggle};
use checkdag::model::RequirementSpec;
use checkdag_test_utils::builders::BoardBuilder;
use checkdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn task_without_requirements_or_dependencies_is_eligible() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let t = b.task("Solo", &[]);
    let board = b.board();

    assert!(board.can_check_complete(t)?);
    assert!(!board.is_complete(t)?, "eligible is not the same as checked");
    assert!(!board.has_dependencies(t)?);
    Ok(())
}

#[test]
fn incomplete_requirement_blocks_and_clears_checked_flag() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let t = b.task("Essay", &[true, false, false]);
    let board = b.board();

    board.set_complete(t, true)?;
    assert!(board.task(t)?.checked_flag());

    assert!(!board.can_check_complete(t)?);
    assert!(!board.task(t)?.checked_flag());

    // First failing requirement wins.
    let second = board.requirements(t)?[1].id();
    assert_eq!(
        board.eligibility(t)?,
        Eligibility::Blocked(Blocker::Requirement(second))
    );
    Ok(())
}

#[test]
fn incomplete_direct_dependency_blocks() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let dep = b.task("Dep", &[]);
    let t = b.task("Main", &[true]);
    b.depends(t, dep);
    let board = b.board();

    // Dep is eligible but not checked, so it is not complete.
    assert!(!board.dependencies_complete(t)?);
    assert!(!board.can_check_complete(t)?);
    assert_eq!(
        board.eligibility(t)?,
        Eligibility::Blocked(Blocker::Dependency(dep))
    );
    Ok(())
}

#[test]
fn toggle_checks_then_unchecks_and_rejects_when_ineligible() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let ok = b.task("Ok", &[true]);
    let blocked = b.task("Blocked", &[false]);
    let board = b.board();

    assert_eq!(board.toggle_complete(ok)?, Toggle::Checked);
    assert!(board.is_complete(ok)?);
    assert!(board.is_checked_complete(ok)?);

    assert_eq!(board.toggle_complete(ok)?, Toggle::Unchecked);
    assert!(!board.is_complete(ok)?);

    assert_eq!(board.toggle_complete(blocked)?, Toggle::Rejected);
    assert_eq!(board.toggle_complete(blocked)?, Toggle::Rejected);
    assert!(!board.is_complete(blocked)?);
    assert!(!board.task(blocked)?.checked_flag());
    Ok(())
}

#[test]
fn adding_ineligible_dependency_then_removing_it_does_not_recheck() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let t = b.task("Main", &[true]);
    let bad = b.task("Bad", &[false]);
    let board = b.board();

    assert_eq!(board.toggle_complete(t)?, Toggle::Checked);
    assert!(board.is_complete(t)?);

    board.add_dependency(t, bad)?;
    assert!(board.contains_dependency(t, bad)?);
    assert!(!board.task(t)?.checked_flag(), "add re-evaluates and clears");
    assert!(!board.can_check_complete(t)?);

    assert!(board.remove_dependency(t, bad)?);
    assert!(board.can_check_complete(t)?);
    assert!(!board.is_complete(t)?, "removal never checks a task");

    assert_eq!(board.toggle_complete(t)?, Toggle::Checked);
    assert!(board.is_complete(t)?);
    Ok(())
}

#[test]
fn adding_incomplete_requirement_clears_checked_flag() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let t = b.task("Main", &[]);
    let board = b.board();

    board.toggle_complete(t)?;
    assert!(board.is_complete(t)?);

    let r = board.add_requirement(t, RequirementSpec::new("late", false))?;
    assert!(board.contains_requirement(t, r)?);
    assert!(!board.task(t)?.checked_flag());

    assert!(board.remove_requirement(t, r)?);
    assert!(!board.remove_requirement(t, r)?);
    assert!(!board.task(t)?.checked_flag());
    Ok(())
}

#[test]
fn replacing_collections_re_evaluates() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let t = b.task("Main", &[false]);
    let other = b.task("Other", &[]);
    let board = b.board();

    board.replace_requirements(t, vec![RequirementSpec::new("done", true)])?;
    assert_eq!(board.requirements(t)?.len(), 1);
    assert!(board.can_check_complete(t)?);
    assert_eq!(board.toggle_complete(t)?, Toggle::Checked);

    board.replace_dependencies(t, &[other])?;
    assert_eq!(board.dependencies(t)?, vec![other]);
    assert!(!board.task(t)?.checked_flag());

    board.replace_dependencies(t, &[])?;
    assert!(!board.has_dependencies(t)?);
    assert!(board.can_check_complete(t)?);
    Ok(())
}

#[test]
fn requirement_completion_is_picked_up_lazily() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let t = b.task("Main", &[true]);
    let board = b.board();

    board.toggle_complete(t)?;
    let r = board.requirements(t)?[0].id();
    assert!(board.set_requirement_complete(t, r, false)?);

    // Flag is untouched until the next read...
    assert!(board.task(t)?.checked_flag());
    // ...which derives the answer and clears it.
    assert!(!board.is_complete(t)?);
    assert!(!board.task(t)?.checked_flag());
    Ok(())
}

#[test]
fn set_complete_bypasses_eligibility_until_next_read() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let t = b.task("Main", &[false]);
    let board = b.board();

    board.set_complete(t, true)?;
    assert!(board.task(t)?.checked_flag());
    assert!(!board.is_complete(t)?);
    assert!(!board.task(t)?.checked_flag());
    Ok(())
}

#[test]
fn write_then_submit_report_scenario() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let write = b.task("Write report", &[true, true]);
    let submit = b.task("Submit report", &[]);
    b.depends(submit, write);
    let board = b.board();

    assert!(board.can_check_complete(write)?);
    assert_eq!(board.toggle_complete(write)?, Toggle::Checked);
    assert!(board.is_complete(write)?);

    assert!(board.dependencies_complete(submit)?);
    assert!(board.can_check_complete(submit)?);
    assert_eq!(board.toggle_complete(submit)?, Toggle::Checked);
    assert!(board.is_complete(submit)?);

    // Un-marking the dependency is seen on the next evaluation of the
    // dependent, not pushed to it.
    assert_eq!(board.toggle_complete(write)?, Toggle::Unchecked);
    assert!(board.task(submit)?.checked_flag());
    assert!(!board.is_complete(submit)?);
    assert!(!board.task(submit)?.checked_flag());
    Ok(())
}

#[test]
fn transitive_dependency_failure_clears_every_task_on_the_path() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let a = b.task("A", &[]);
    let bb = b.task("B", &[]);
    let c = b.task("C", &[true]);
    b.depends(a, bb).depends(bb, c);
    let board = b.board();

    board.set_complete(a, true)?;
    board.set_complete(bb, true)?;
    board.set_complete(c, true)?;
    assert!(board.is_complete(a)?);

    let r = board.requirements(c)?[0].id();
    board.set_requirement_complete(c, r, false)?;

    assert_eq!(
        board.eligibility(a)?,
        Eligibility::Blocked(Blocker::Dependency(bb))
    );
    for id in [a, bb, c] {
        assert!(!board.task(id)?.checked_flag());
    }
    Ok(())
}

#[test]
fn dependency_order_decides_the_reported_blocker() -> TestResult {
    init_tracing();
    let mut b = BoardBuilder::new();
    let first = b.task("First", &[false]);
    let second = b.task("Second", &[false]);
    let t = b.task("Main", &[]);
    b.depends(t, second).depends(t, first);
    let board = b.board();

    assert_eq!(
        board.eligibility(t)?,
        Eligibility::Blocked(Blocker::Dependency(second))
    );
    Ok(())
}

#[test]
fn removing_a_missing_dependency_returns_false() -> TestResult {
    let mut b = BoardBuilder::new();
    let a = b.task("A", &[]);
    let other = b.task("B", &[]);
    let board = b.board();

    assert!(!board.remove_dependency(a, other)?);
    assert!(!board.contains_dependency(a, other)?);
    Ok(())
}
