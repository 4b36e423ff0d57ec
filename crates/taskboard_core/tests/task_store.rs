use taskboard_core::{
    FixedClock, MoveOutcome, NewTask, StoreError, TaskPatch, TaskStatus, TaskStore,
    TaskValidationError,
};
use uuid::Uuid;

fn store() -> TaskStore<FixedClock> {
    TaskStore::with_clock(FixedClock::new(1_000))
}

fn titles(store: &TaskStore<FixedClock>, status: TaskStatus) -> Vec<String> {
    store
        .list_by_status(status)
        .iter()
        .map(|task| task.title.clone())
        .collect()
}

#[test]
fn create_places_task_in_exactly_its_column() {
    let mut store = store();
    for status in TaskStatus::ALL {
        let task = store
            .create(NewTask::new(format!("in {status}")).status(status))
            .unwrap();
        assert_eq!(task.status, status);

        for column in TaskStatus::ALL {
            let present = store.list_by_status(column).iter().any(|t| t.id == task.id);
            assert_eq!(present, column == status);
        }
    }
}

#[test]
fn create_normalizes_text_fields() {
    let mut store = store();
    let task = store
        .create(NewTask::new("  Write spec ").description("   ").deadline(9_000))
        .unwrap();

    assert_eq!(task.title, "Write spec");
    assert_eq!(task.description, None);
    assert_eq!(task.deadline, Some(9_000));
    assert_eq!(task.created_at, 1_000);
    assert_eq!(task.status, TaskStatus::Todo);
}

#[test]
fn create_with_blank_title_leaves_collection_unchanged() {
    let mut store = store();
    store.create(NewTask::new("keep")).unwrap();

    for blank in ["", "   ", "\n\t"] {
        let err = store.create(NewTask::new(blank)).unwrap_err();
        assert_eq!(err, StoreError::InvalidInput(TaskValidationError::EmptyTitle));
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn ids_are_unique() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    let b = store.create(NewTask::new("a")).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn update_changes_only_given_fields() {
    let mut store = store();
    let original = store
        .create(NewTask::new("title").description("desc").deadline(5_000))
        .unwrap();
    store.clock().advance(10_000);

    let updated = store
        .update(original.id, TaskPatch::default().title(" renamed "))
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.description.as_deref(), Some("desc"));
    assert_eq!(updated.deadline, Some(5_000));
    assert_eq!(updated.status, TaskStatus::Todo);
}

#[test]
fn update_distinguishes_keep_set_and_clear() {
    let mut store = store();
    let task = store
        .create(NewTask::new("t").description("old").deadline(1))
        .unwrap();

    let updated = store
        .update(task.id, TaskPatch::default().description("  new  ").clear_deadline())
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("new"));
    assert_eq!(updated.deadline, None);

    let updated = store
        .update(task.id, TaskPatch::default().description(" "))
        .unwrap();
    assert_eq!(updated.description, None);

    let updated = store
        .update(task.id, TaskPatch::default().description("again").deadline(7))
        .unwrap();
    let cleared = store
        .update(task.id, TaskPatch::default().clear_description())
        .unwrap();
    assert_eq!(updated.deadline, Some(7));
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.deadline, Some(7));
}

#[test]
fn update_with_blank_title_is_all_or_nothing() {
    let mut store = store();
    let task = store.create(NewTask::new("stable").description("d")).unwrap();

    let patch = TaskPatch::default()
        .title("   ")
        .description("changed")
        .status(TaskStatus::Done)
        .deadline(42);
    let err = store.update(task.id, patch).unwrap_err();

    assert_eq!(err, StoreError::InvalidInput(TaskValidationError::EmptyTitle));
    assert_eq!(store.get(task.id), Some(&task));
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut store = store();
    let id = Uuid::new_v4();
    let err = store.update(id, TaskPatch::default().title("x")).unwrap_err();
    assert_eq!(err, StoreError::NotFound(id));
}

#[test]
fn update_status_appends_to_destination_column() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    store.create(NewTask::new("b").status(TaskStatus::Done)).unwrap();

    store
        .update(a.id, TaskPatch::default().status(TaskStatus::Done))
        .unwrap();
    assert_eq!(titles(&store, TaskStatus::Done), vec!["b", "a"]);
}

#[test]
fn delete_removes_from_every_column() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    store.create(NewTask::new("b").status(TaskStatus::Done)).unwrap();

    assert!(store.delete(a.id));
    assert_eq!(store.len(), 1);
    for status in TaskStatus::ALL {
        assert!(store.list_by_status(status).iter().all(|t| t.id != a.id));
    }
}

#[test]
fn delete_unknown_id_is_a_noop() {
    let mut store = store();
    store.create(NewTask::new("a")).unwrap();
    let before = store.tasks().to_vec();

    assert!(!store.delete(Uuid::new_v4()));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn move_to_same_status_twice_is_idempotent() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    store.create(NewTask::new("b").status(TaskStatus::InProgress)).unwrap();

    let first = store.move_task(a.id, TaskStatus::InProgress).unwrap();
    let after_one = store.tasks().to_vec();
    let second = store.move_task(a.id, TaskStatus::InProgress).unwrap();

    assert_eq!(
        first,
        MoveOutcome::Moved {
            from: TaskStatus::Todo,
            to: TaskStatus::InProgress,
        }
    );
    assert_eq!(second, MoveOutcome::Unchanged);
    assert_eq!(store.tasks(), after_one.as_slice());
}

#[test]
fn move_to_current_status_does_not_reorder() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    store.create(NewTask::new("b")).unwrap();
    let before = store.tasks().to_vec();

    assert_eq!(
        store.move_task(a.id, TaskStatus::Todo).unwrap(),
        MoveOutcome::Unchanged
    );
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn cross_column_move_appends_and_keeps_identity() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    store.create(NewTask::new("b").status(TaskStatus::Done)).unwrap();
    store.create(NewTask::new("c").status(TaskStatus::Done)).unwrap();

    store.move_task(a.id, TaskStatus::Done).unwrap();

    assert_eq!(titles(&store, TaskStatus::Done), vec!["b", "c", "a"]);
    assert!(titles(&store, TaskStatus::Todo).is_empty());
    let moved = store.get(a.id).unwrap();
    assert_eq!(moved.created_at, a.created_at);
    assert_eq!(store.len(), 3);
}

#[test]
fn move_with_index_inserts_at_slot() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    store.create(NewTask::new("b").status(TaskStatus::Done)).unwrap();
    store.create(NewTask::new("c").status(TaskStatus::Done)).unwrap();

    store.move_to(a.id, TaskStatus::Done, Some(1)).unwrap();
    assert_eq!(titles(&store, TaskStatus::Done), vec!["b", "a", "c"]);
}

#[test]
fn reorder_within_column_and_clamp() {
    let mut store = store();
    let a = store.create(NewTask::new("a")).unwrap();
    store.create(NewTask::new("b")).unwrap();
    let c = store.create(NewTask::new("c")).unwrap();

    let outcome = store.move_to(a.id, TaskStatus::Todo, Some(99)).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Reordered {
            status: TaskStatus::Todo,
            from_index: 0,
            to_index: 2,
        }
    );
    assert_eq!(titles(&store, TaskStatus::Todo), vec!["b", "c", "a"]);

    store.move_to(c.id, TaskStatus::Todo, Some(0)).unwrap();
    assert_eq!(titles(&store, TaskStatus::Todo), vec!["c", "b", "a"]);

    assert_eq!(
        store.move_to(c.id, TaskStatus::Todo, Some(0)).unwrap(),
        MoveOutcome::Unchanged
    );
}

#[test]
fn move_unknown_id_is_not_found() {
    let mut store = store();
    let id = Uuid::new_v4();
    assert_eq!(
        store.move_task(id, TaskStatus::Done).unwrap_err(),
        StoreError::NotFound(id)
    );
}

#[test]
fn task_walks_the_board_from_todo_to_done() {
    let mut store = store();
    let task = store.create(NewTask::new("Write spec")).unwrap();
    store.clock().advance(60_000);

    store.move_task(task.id, TaskStatus::InProgress).unwrap();
    store
        .update(task.id, TaskPatch::default().description("final draft"))
        .unwrap();

    assert_eq!(store.len(), 1);
    let finished = &store.tasks()[0];
    assert_eq!(finished.id, task.id);
    assert_eq!(finished.created_at, task.created_at);
    assert_eq!(finished.status, TaskStatus::InProgress);
    assert_eq!(finished.description.as_deref(), Some("final draft"));
    assert_eq!(finished.title, "Write spec");
}
