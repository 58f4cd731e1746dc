//! Bulk add, end to end through the local service
mod common;

use common::FixedExtractor;
use quadrant_tasks::extract::ExtractedTask;
use quadrant_tasks::*;
use std::sync::Arc;
use tempfile::TempDir;

fn create_test_service(
    extractor: Arc<dyn TaskExtractor>,
) -> (Arc<LocalTaskService>, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("tasks.toml"));
    let service = LocalTaskService::open(storage, extractor).unwrap();
    (Arc::new(service), dir)
}

#[tokio::test]
async fn test_bulk_parse_defaults_missing_quadrant() {
    let extractor = FixedExtractor::new(vec![
        ExtractedTask::new("Buy milk", None),
        ExtractedTask::new("call accountant urgently", Some(Quadrant::ImportantUrgent)),
    ]);
    let (service, _dir) = create_test_service(extractor.clone());
    let store = TaskStore::new(service.clone());

    store
        .bulk_add("Buy milk; call accountant urgently")
        .await
        .unwrap();

    let tasks = store.tasks();
    assert_eq!(tasks.len(), 2);
    for title in ["Buy milk", "call accountant urgently"] {
        let task = tasks.iter().find(|t| t.title == title).unwrap();
        assert_eq!(task.quadrant, Quadrant::ImportantUrgent);
        assert!(!task.completed);
    }
    assert_eq!(
        extractor.seen.lock().unwrap().as_slice(),
        ["Buy milk; call accountant urgently".to_string()]
    );
}

#[tokio::test]
async fn test_bulk_parse_with_rule_extractor() {
    let (service, _dir) = create_test_service(Arc::new(RuleExtractor::new()));
    let store = TaskStore::new(service);

    store
        .bulk_add("Buy milk; call accountant urgently\n- maybe repaint fence")
        .await
        .unwrap();

    let quadrant_of = |title: &str| {
        store
            .tasks()
            .into_iter()
            .find(|t| t.title == title)
            .map(|t| t.quadrant)
    };
    assert_eq!(quadrant_of("Buy milk"), Some(Quadrant::ImportantUrgent));
    assert_eq!(
        quadrant_of("call accountant urgently"),
        Some(Quadrant::ImportantUrgent)
    );
    assert_eq!(
        quadrant_of("maybe repaint fence"),
        Some(Quadrant::NotImportantNotUrgent)
    );
}

#[tokio::test]
async fn test_extraction_failure_persists_nothing() {
    let (service, _dir) = create_test_service(FixedExtractor::failing("tasks missing"));
    let store = TaskStore::new(service.clone());
    store.add_task(NewTask::new("Existing")).await.unwrap();

    let result = store.bulk_add("Buy milk").await;

    assert!(matches!(
        result,
        Err(StoreError::Api(ApiError::Extraction(_)))
    ));
    let error = store.error().unwrap();
    assert!(error.starts_with("Failed to parse tasks:"));
    assert!(error.contains("tasks missing"));
    assert_eq!(service.fetch_tasks().await.unwrap().len(), 1);
    assert_eq!(store.tasks().len(), 1);
}

#[tokio::test]
async fn test_service_rejects_blank_parse_text() {
    let (service, _dir) = create_test_service(Arc::new(RuleExtractor::new()));

    let err = service.parse_tasks(" \n ").await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.to_string(), "Text is required");
}
