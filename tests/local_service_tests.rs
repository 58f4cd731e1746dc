//! Local task service tests: validation, not-found handling, persistence
mod common;

use quadrant_tasks::*;
use std::sync::Arc;
use tempfile::TempDir;

fn open_service(dir: &TempDir) -> LocalTaskService {
    let storage = Storage::new(dir.path().join("tasks.toml"));
    LocalTaskService::open(storage, Arc::new(RuleExtractor::new())).unwrap()
}

#[tokio::test]
async fn test_create_assigns_id_and_trims_title() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir);

    let task = service
        .create_task(&NewTask::new("  Pay rent ").in_quadrant(Quadrant::ImportantNotUrgent))
        .await
        .unwrap();

    assert_eq!(task.title, "Pay rent");
    assert_eq!(task.quadrant, Quadrant::ImportantNotUrgent);
    assert!(!task.completed);
    assert_eq!(task.id.len(), 32);
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir);

    let err = service.create_task(&NewTask::new("   ")).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(service.fetch_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_validate_ids() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir);

    let err = service
        .update_task("bogus", &TaskUpdate::completed(true))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid task ID");

    let missing = uuid::Uuid::new_v4().simple().to_string();
    let err = service.delete_task(&missing).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.to_string(), "Task not found");
}

#[tokio::test]
async fn test_update_merges_partial_fields() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir);
    let task = service.create_task(&NewTask::new("Draft report")).await.unwrap();

    let updated = service
        .update_task(&task.id, &TaskUpdate::quadrant(Quadrant::NotImportantUrgent))
        .await
        .unwrap();

    assert_eq!(updated.title, "Draft report");
    assert_eq!(updated.quadrant, Quadrant::NotImportantUrgent);
    assert_eq!(updated.created_at, task.created_at);

    let err = service
        .update_task(&task.id, &TaskUpdate::title(""))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Title cannot be empty");
}

#[tokio::test]
async fn test_fetch_is_newest_first() {
    let dir = TempDir::new().unwrap();
    let service = open_service(&dir);
    service.create_task(&NewTask::new("first")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    service.create_task(&NewTask::new("second")).await.unwrap();

    let titles: Vec<String> = service
        .fetch_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn test_tasks_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let id = {
        let service = open_service(&dir);
        let task = service.create_task(&NewTask::new("Keep me")).await.unwrap();
        let gone = service.create_task(&NewTask::new("Delete me")).await.unwrap();
        service.delete_task(&gone.id).await.unwrap();
        service
            .update_task(&task.id, &TaskUpdate::completed(true))
            .await
            .unwrap();
        task.id
    };

    let reopened = open_service(&dir);
    let tasks = reopened.fetch_tasks().await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert!(tasks[0].completed);
}

#[tokio::test]
async fn test_store_rollback_against_local_service() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(open_service(&dir));
    let store = TaskStore::new(service.clone());
    store.add_task(NewTask::new("Real task")).await.unwrap();
    let before = store.tasks();
    let id = before[0].id.clone();

    // A blank title is rejected by the service, so the optimistic edit is undone
    let result = store.edit_task(&id, TaskUpdate::title("  ")).await;

    assert!(result.is_err());
    assert_eq!(store.tasks(), before);
    assert_eq!(store.error().as_deref(), Some("Title cannot be empty"));
}
