use proptest::prelude::*;
use checkdag::graph::{Blocker, Eligibility};
use checkdag::model::TaskId;
use checkdag_test_utils::builders::BoardBuilder;

/// Random board shape: per task, requirement states, an initial checked
/// flag, and dependency indices. Any index is allowed, so self edges and
/// cycles are generated too.
#[derive(Debug, Clone)]
struct Shape {
    requirements: Vec<Vec<bool>>,
    checked: Vec<bool>,
    deps: Vec<Vec<usize>>,
}

fn shape_strategy(max_tasks: usize) -> impl Strategy<Value = Shape> {
    (1..=max_tasks).prop_flat_map(|n| {
        (
            proptest::collection::vec(proptest::collection::vec(any::<bool>(), 0..3), n),
            proptest::collection::vec(any::<bool>(), n),
            proptest::collection::vec(proptest::collection::vec(0..n, 0..3), n),
        )
            .prop_map(|(requirements, checked, deps)| Shape {
                requirements,
                checked,
                deps,
            })
    })
}

fn build(shape: &Shape) -> (checkdag::graph::TaskBoard, Vec<TaskId>) {
    let mut b = BoardBuilder::new();
    let ids: Vec<TaskId> = shape
        .requirements
        .iter()
        .enumerate()
        .map(|(i, reqs)| b.task(&format!("task_{i}"), reqs))
        .collect();
    for (i, deps) in shape.deps.iter().enumerate() {
        for &d in deps {
            b.depends(ids[i], ids[d]);
        }
    }
    let mut board = b.build();
    for (i, &c) in shape.checked.iter().enumerate() {
        board.set_complete(ids[i], c).unwrap();
    }
    (board, ids)
}

proptest! {
    #[test]
    fn evaluation_terminates_and_respects_the_definition(shape in shape_strategy(8)) {
        let (mut board, ids) = build(&shape);
        let cyclic = board.dependency_index().cyclic_tasks();

        for &id in &ids {
            let verdict = board.eligibility(id).unwrap();
            let task = board.task(id).unwrap();

            if task.requirements().iter().any(|r| !r.is_complete()) {
                prop_assert!(matches!(verdict, Eligibility::Blocked(Blocker::Requirement(_))));
            }
            if cyclic.contains(&id) {
                prop_assert!(!verdict.is_eligible(), "{} is on a cycle but eligible", id);
            }
            if !verdict.is_eligible() {
                prop_assert!(!task.checked_flag(), "ineligible task kept its flag");
            }
        }
    }

    #[test]
    fn complete_tasks_have_complete_dependencies(shape in shape_strategy(8)) {
        let (mut board, ids) = build(&shape);

        for &id in &ids {
            if board.is_complete(id).unwrap() {
                prop_assert!(board.dependencies_complete(id).unwrap());
                for dep in board.dependencies(id).unwrap() {
                    prop_assert!(board.is_complete(dep).unwrap());
                }
            }
        }
    }

    #[test]
    fn toggle_never_checks_an_ineligible_task(shape in shape_strategy(8)) {
        let (mut board, ids) = build(&shape);

        for &id in &ids {
            let eligible = board.can_check_complete(id).unwrap();
            let was_complete = board.is_complete(id).unwrap();
            board.toggle_complete(id).unwrap();
            let now_checked = board.task(id).unwrap().checked_flag();

            if !eligible {
                prop_assert!(!now_checked);
            } else {
                prop_assert_eq!(now_checked, !was_complete);
            }
        }
    }
}
