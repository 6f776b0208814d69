use chrono::NaiveDate;
use checkdag::graph::TaskBoard;
use checkdag::model::{Deadline, NewTask, Note, TypeRegistry};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn new_task_starts_unchecked_and_empty() {
    let mut board = TaskBoard::new(TypeRegistry::builtin());
    let id = board.create_task(
        NewTask::new("Read chapter 3", date(2017, 4, 27))
            .details("pages 40-80")
            .weighting(-3)
            .type_label("reading"),
    );

    let task = board.task(id).unwrap();
    assert_eq!(task.to_string(), "Read chapter 3");
    assert_eq!(task.details(), "pages 40-80");
    assert_eq!(task.weighting(), -3);
    assert_eq!(task.task_type().label(), "Reading");
    assert!(task.requirements().is_empty());
    assert!(task.notes().is_empty());
    assert!(!task.checked_flag());
    assert!(!board.has_dependencies(id).unwrap());
}

#[test]
fn unknown_type_label_at_construction_uses_default() {
    let mut board = TaskBoard::new(TypeRegistry::builtin());
    let id = board.create_task(NewTask::new("x", date(2017, 1, 1)).type_label("Nope"));
    assert_eq!(board.task(id).unwrap().task_type().label(), "Other");
}

#[test]
fn set_type_ignores_unknown_labels() {
    let mut board = TaskBoard::new(TypeRegistry::builtin());
    let id = board.create_task(NewTask::new("x", date(2017, 1, 1)).type_label("Exam"));

    assert!(!board.set_type(id, "Party").unwrap());
    assert_eq!(board.task(id).unwrap().task_type().label(), "Exam");

    assert!(board.set_type(id, "  writing ").unwrap());
    assert_eq!(board.task(id).unwrap().task_type().label(), "Writing");
}

#[test]
fn deadline_replaces_the_wrapped_date() {
    let mut board = TaskBoard::new(TypeRegistry::builtin());
    let id = board.create_task(NewTask::new("x", date(2017, 4, 27)));
    assert_eq!(
        board.task(id).unwrap().deadline().timestamp(),
        "27/04/2017T00:00:01Z"
    );

    board.set_deadline(id, date(2018, 12, 3)).unwrap();
    let deadline = board.task(id).unwrap().deadline();
    assert_eq!(deadline.display(), "03/12/2018");
    assert_eq!(deadline.to_string(), "03/12/2018");
    assert_eq!(
        Deadline::parse_timestamp(&deadline.timestamp()),
        Some(*deadline)
    );
    assert_eq!(Deadline::parse_timestamp("03/12/2018"), None);
}

#[test]
fn weighting_and_notes_do_not_affect_completion() {
    let mut board = TaskBoard::new(TypeRegistry::builtin());
    let id = board.create_task(NewTask::new("x", date(2017, 1, 1)));

    board.set_weighting(id, 1_000).unwrap();
    board
        .add_note(
            id,
            Note {
                title: "remember".into(),
                text: "bring a pen".into(),
            },
        )
        .unwrap();

    assert_eq!(board.task(id).unwrap().weighting(), 1_000);
    assert_eq!(board.task(id).unwrap().notes().len(), 1);
    assert!(board.can_check_complete(id).unwrap());
}

#[test]
fn registry_matches_labels_loosely_and_returns_canonical_form() {
    let reg = TypeRegistry::new(["Lab", "Lecture", "lab"], "lecture").unwrap();

    assert_eq!(reg.labels().collect::<Vec<_>>(), vec!["Lab", "Lecture"]);
    assert!(reg.exists("LAB"));
    assert!(!reg.exists("Exam"));
    assert_eq!(reg.get(" lab ").unwrap().label(), "Lab");
    assert_eq!(reg.default_type().label(), "Lecture");
    assert_eq!(reg.resolve_or_default("nothing").label(), "Lecture");

    assert!(TypeRegistry::new(["Lab"], "Exam").is_none());
}

#[test]
fn find_by_name_returns_first_match_in_creation_order() {
    let mut board = TaskBoard::new(TypeRegistry::builtin());
    let first = board.create_task(NewTask::new("dup", date(2017, 1, 1)));
    let _second = board.create_task(NewTask::new("dup", date(2017, 1, 2)));

    assert_eq!(board.find_by_name("dup"), Some(first));
    assert_eq!(board.find_by_name("missing"), None);
    assert_eq!(board.len(), 2);
}
