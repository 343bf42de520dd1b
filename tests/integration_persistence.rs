//! Integration tests for the persistence round-trip: save/load through both
//! storage backends, timestamp rehydration, corrupt-slot fallback, reset,
//! and write-failure tolerance.

use chrono::{DateTime, Duration, Utc};
use taskboard::{
    default_board, BoardStore, ColumnId, FileStorage, MemoryStorage, Priority, Result, Storage,
    TaskDraft, STORAGE_KEY,
};
use tempfile::TempDir;

fn col(id: &str) -> ColumnId {
    ColumnId::from_string(id)
}

#[test]
fn test_memory_round_trip_reproduces_board() {
    let mut store = BoardStore::open(MemoryStorage::new());
    let due = Utc::now() + Duration::days(3);
    let id = store
        .create_task(
            &col("todo"),
            TaskDraft::new("Persisted task")
                .with_priority(Priority::Urgent)
                .with_tags(vec!["infra".into()])
                .with_due_date(due),
        )
        .unwrap();
    store.move_task(&id, &col("todo"), &col("review"), 0);
    let saved = store.snapshot();

    // reopen against the same storage
    let reopened = BoardStore::open(store.into_storage());
    assert_eq!(reopened.state(), &saved);

    // dates come back as genuine timestamps, comparable by equality
    let task = reopened.task(&id).unwrap();
    assert_eq!(task.due_date, Some(due));
    assert_eq!(task.created_at, saved.task(&id).unwrap().created_at);
    assert!(!task.is_overdue(Utc::now()));
}

#[test]
fn test_file_round_trip_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("board");

    let due = Utc::now() - Duration::days(2);
    let (id, saved) = {
        let mut store = BoardStore::open(FileStorage::new(&root));
        let id = store
            .create_task(
                &col("in-progress"),
                TaskDraft::new("Overdue task").with_due_date(due),
            )
            .unwrap();
        (id, store.snapshot())
    };

    assert!(root.join(format!("{}.json", STORAGE_KEY)).exists());

    let store = BoardStore::open(FileStorage::new(&root));
    assert_eq!(store.state(), &saved);

    let task = store.task(&id).unwrap();
    assert_eq!(task.due_date, Some(due));
    assert!(task.is_overdue(Utc::now()));
}

#[test]
fn test_wire_format_shape() {
    let mut store = BoardStore::open(MemoryStorage::new());
    let id = store
        .create_task(
            &col("todo"),
            TaskDraft::new("Wire check").with_due_date(Utc::now()),
        )
        .unwrap();

    let blob = store.storage().get(STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();

    // {columns: {id -> Column}, tasks: {id -> Task}, columnOrder: [id...]}
    assert!(json["columns"]["todo"]["taskIds"].is_array());
    assert_eq!(json["columns"]["in-progress"]["maxTasks"], 3);
    assert_eq!(json["columnOrder"][0], "todo");

    // timestamps travel as ISO-8601 text
    let task = &json["tasks"][id.as_str()];
    let created = task["createdAt"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(created).is_ok());
    let due = task["dueDate"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(due).is_ok());
    assert_eq!(task["priority"], "medium");
}

#[test]
fn test_corrupt_slot_falls_back_to_default() {
    let mut storage = MemoryStorage::new();
    storage.set(STORAGE_KEY, "{not json at all").unwrap();

    let store = BoardStore::open(storage);
    assert_eq!(store.state(), &default_board());
}

#[test]
fn test_inconsistent_slot_falls_back_to_default() {
    // parseable, but the task's status names no column
    let blob = r##"{
        "columns": {
            "todo": {"id": "todo", "title": "To Do", "color": "#0ea5e9", "taskIds": []}
        },
        "tasks": {
            "t1": {
                "id": "t1",
                "title": "Stray",
                "status": "nowhere",
                "createdAt": "2026-08-01T09:00:00Z"
            }
        },
        "columnOrder": ["todo"]
    }"##;
    let mut storage = MemoryStorage::new();
    storage.set(STORAGE_KEY, blob).unwrap();

    let store = BoardStore::open(storage);
    assert_eq!(store.state(), &default_board());
}

#[test]
fn test_partial_task_fields_default_on_load() {
    // older blobs may omit description/priority/assignee/tags
    let blob = r##"{
        "columns": {
            "todo": {"id": "todo", "title": "To Do", "color": "#0ea5e9", "taskIds": ["t1"]}
        },
        "tasks": {
            "t1": {
                "id": "t1",
                "title": "Sparse",
                "status": "todo",
                "createdAt": "2026-08-01T09:00:00Z"
            }
        },
        "columnOrder": ["todo"]
    }"##;
    let mut storage = MemoryStorage::new();
    storage.set(STORAGE_KEY, blob).unwrap();

    let store = BoardStore::open(storage);
    let task = store.task(&"t1".into()).unwrap();
    assert_eq!(task.priority, Priority::Medium);
    assert!(task.description.is_empty());
    assert!(task.tags.is_empty());
    assert!(task.due_date.is_none());
}

#[test]
fn test_reset_clears_slot_and_restores_default() {
    let mut store = BoardStore::open(MemoryStorage::new());
    store
        .create_task(&col("todo"), TaskDraft::new("Doomed"))
        .unwrap();

    store.reset();
    assert_eq!(store.state(), &default_board());
    assert!(store.storage().get(STORAGE_KEY).unwrap().is_none());

    // a reopened store sees the cleared slot, not the old task
    let reopened = BoardStore::open(store.into_storage());
    assert_eq!(reopened.state(), &default_board());
}

/// Storage whose writes always fail, for exercising the fire-and-forget
/// contract.
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }
}

#[test]
fn test_write_failure_does_not_roll_back_memory() {
    let mut store = BoardStore::open(BrokenStorage);

    let id = store
        .create_task(&col("todo"), TaskDraft::new("Kept in memory"))
        .unwrap();

    // the mutation is observable despite the failed write, and further
    // operations keep working
    assert_eq!(store.task(&id).unwrap().title, "Kept in memory");
    assert!(store.move_task(&id, &col("todo"), &col("done"), 0));
    assert_eq!(store.task(&id).unwrap().status, col("done"));

    // reset tolerates a failing remove too
    store.reset();
    assert_eq!(store.state(), &default_board());
}
