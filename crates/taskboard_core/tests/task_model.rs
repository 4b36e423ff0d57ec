use taskboard_core::{Column, Task, TaskStatus, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_sets_defaults() {
    let task = Task::new("  hello  ", TaskStatus::Todo, 1_700_000_000_000).unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "hello");
    assert_eq!(task.description, None);
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.deadline, None);
    assert_eq!(task.created_at, 1_700_000_000_000);
    assert!(task.validate().is_ok());
}

#[test]
fn blank_title_is_rejected() {
    let err = Task::new(" \t ", TaskStatus::Done, 0).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task =
        Task::with_id(id, "Write spec", TaskStatus::InProgress, 1_700_000_000_000).unwrap();
    task.description = Some("final draft".to_string());
    task.deadline = Some(1_700_000_360_000);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Write spec");
    assert_eq!(json["description"], "final draft");
    assert_eq!(json["status"], "in-progress");
    assert_eq!(json["deadline"], 1_700_000_360_000_i64);
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn absent_optionals_are_omitted_on_the_wire() {
    let task = Task::new("bare", TaskStatus::Todo, 0).unwrap();
    let json = serde_json::to_value(&task).unwrap();

    assert!(json.get("description").is_none());
    assert!(json.get("deadline").is_none());
}

#[test]
fn status_order_and_titles_match_board() {
    let titles: Vec<&str> = TaskStatus::ALL.iter().map(|status| status.title()).collect();
    assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
    assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
}

#[test]
fn column_serializes_with_title_and_tasks() {
    let column = Column {
        id: TaskStatus::Done,
        title: TaskStatus::Done.title(),
        tasks: vec![Task::new("shipped", TaskStatus::Done, 0).unwrap()],
    };

    let json = serde_json::to_value(&column).unwrap();
    assert_eq!(json["id"], "done");
    assert_eq!(json["title"], "Done");
    assert_eq!(json["tasks"][0]["title"], "shipped");
}
