use chrono::{TimeZone, Utc};
use showcase_core::{
    ConfigError, ImportError, ImportSummary, KeyValueStore, MemoryKeyValueStore, Project,
    ProjectDraft, ProjectField, ProjectId, ProjectService, ProjectServiceError, SearchState,
    ShowcaseConfig, SortOrder, SqliteKeyValueStore, SubmitOutcome,
};
use std::cell::RefCell;
use std::rc::Rc;

fn project(id: i64, hour: u32) -> Project {
    Project::with_id(
        ProjectId(id),
        format!("Project {id}"),
        format!("Description {id}"),
        Utc.with_ymd_and_hms(2026, 2, 8, hour, 0, 0).unwrap(),
    )
}

fn added(outcome: SubmitOutcome) -> Project {
    match outcome {
        SubmitOutcome::Added(project) => project,
        other => panic!("expected Added, got {other:?}"),
    }
}

#[test]
fn submit_valid_draft_adds_trimmed_project() {
    let mut service = ProjectService::default();
    let project = added(service.submit(&ProjectDraft::new("  My App  ", "  desc  ")));

    assert_eq!(project.title(), "My App");
    assert_eq!(project.description(), "desc");
    assert_eq!(service.store().projects(), &[project]);
}

#[test]
fn submit_invalid_draft_returns_field_errors_and_adds_nothing() {
    let mut service = ProjectService::default();
    let outcome = service.submit(&ProjectDraft::new("", "x".repeat(1001)));

    let SubmitOutcome::Rejected(report) = outcome else {
        panic!("expected Rejected");
    };
    assert_eq!(report.error(ProjectField::Title), Some("Title is required"));
    assert_eq!(
        report.error(ProjectField::Description),
        Some("Description must be less than 1000 characters")
    );
    assert!(service.store().is_empty());
}

#[test]
fn delete_reports_whether_project_existed() {
    let mut service = ProjectService::default();
    let project = added(service.submit(&ProjectDraft::new("Title", "Body")));

    assert!(!service.delete(ProjectId(-1)));
    assert!(service.delete(project.id()));
    assert!(service.store().is_empty());
}

#[test]
fn update_revises_existing_project() {
    let mut service = ProjectService::default();
    let original = added(service.submit(&ProjectDraft::new("Title", "Body")));

    let revised = service
        .update(original.id(), &ProjectDraft::new(" New title ", "New body"))
        .unwrap();
    assert_eq!(revised.id(), original.id());
    assert_eq!(revised.created_at(), original.created_at());
    assert_eq!(
        service.store().get(original.id()).unwrap().title(),
        "New title"
    );
}

#[test]
fn update_rejects_invalid_draft_and_unknown_id() {
    let mut service = ProjectService::default();
    let original = added(service.submit(&ProjectDraft::new("Title", "Body")));

    let err = service
        .update(original.id(), &ProjectDraft::new("", "Body"))
        .unwrap_err();
    assert!(matches!(err, ProjectServiceError::Validation(_)));

    let err = service
        .update(ProjectId(12345), &ProjectDraft::new("Title", "Body"))
        .unwrap_err();
    assert!(matches!(err, ProjectServiceError::ProjectNotFound(ProjectId(12345))));
    assert_eq!(service.store().get(original.id()).unwrap().title(), "Title");
}

#[test]
fn visible_projects_follow_search_state() {
    let mut service = ProjectService::default();
    service.submit(&ProjectDraft::new("React App", "A React application"));
    service.submit(&ProjectDraft::new("Vue App", "A Vue application"));

    let mut search = SearchState::new();
    assert_eq!(service.visible_projects(&search).len(), 2);

    search.set_term("vue");
    let visible = service.visible_projects(&search);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title(), "Vue App");
}

#[test]
fn sorted_does_not_change_store_order() {
    let mut service = ProjectService::default();
    service.import_json(
        &showcase_core::export_projects_as_json(&[project(1, 9), project(2, 11), project(3, 10)]),
    )
    .unwrap();

    let newest_first = service
        .sorted(SortOrder::Desc)
        .iter()
        .map(|project| project.id().0)
        .collect::<Vec<_>>();
    assert_eq!(newest_first, vec![2, 3, 1]);

    let stored = service
        .store()
        .projects()
        .iter()
        .map(|project| project.id().0)
        .collect::<Vec<_>>();
    assert_eq!(stored, vec![1, 2, 3]);
}

#[test]
fn import_skips_ids_already_present() {
    let mut service = ProjectService::default();
    service
        .import_json(&showcase_core::export_projects_as_json(&[project(1, 9)]))
        .unwrap();

    let text = showcase_core::export_projects_as_json(&[project(1, 9), project(2, 10)]);
    let summary = service.import_json(&text).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            imported: 1,
            skipped_duplicates: 1
        }
    );
    assert_eq!(service.store().len(), 2);
}

#[test]
fn import_lands_as_one_store_change() {
    let notifications = Rc::new(RefCell::new(Vec::new()));
    let mut service = ProjectService::default();
    let seen = Rc::clone(&notifications);
    service
        .store_mut()
        .subscribe(move |projects| seen.borrow_mut().push(projects.len()));

    let batch = (1..=5).map(|id| project(id, 9)).collect::<Vec<_>>();
    let summary = service
        .import_json(&showcase_core::export_projects_as_json(&batch))
        .unwrap();

    assert_eq!(summary.imported, 5);
    assert_eq!(*notifications.borrow(), vec![5]);
    assert_eq!(service.store().projects(), batch.as_slice());

    let repeat = service
        .import_json(&showcase_core::export_projects_as_json(&batch))
        .unwrap();
    assert_eq!(repeat.skipped_duplicates, 5);
    assert_eq!(*notifications.borrow(), vec![5]);
}

#[test]
fn failed_import_leaves_store_untouched() {
    let mut service = ProjectService::default();
    service.submit(&ProjectDraft::new("Title", "Body"));

    let err = service.import_json("not json").unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));
    assert_eq!(service.store().len(), 1);
}

#[test]
fn export_then_import_into_fresh_service_copies_collection() {
    let mut source = ProjectService::default();
    source.submit(&ProjectDraft::new("One", "First"));
    source.submit(&ProjectDraft::new("Two", "Second"));

    let mut target = ProjectService::default();
    target.import_json(&source.export_json()).unwrap();
    assert_eq!(target.store().projects(), source.store().projects());
}

#[test]
fn bootstrap_hydrates_from_backend_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.sqlite3");
    let config = ShowcaseConfig::default();

    let saved = {
        let backend: Box<dyn KeyValueStore> = Box::new(SqliteKeyValueStore::open(&path).unwrap());
        let mut service = ProjectService::bootstrap(&config, Some(backend)).unwrap();
        added(service.submit(&ProjectDraft::new("Durable", "Survives restart")))
    };

    let backend: Box<dyn KeyValueStore> = Box::new(SqliteKeyValueStore::open(&path).unwrap());
    let service = ProjectService::bootstrap(&config, Some(backend)).unwrap();
    assert_eq!(service.store().projects(), &[saved]);
}

#[test]
fn bootstrap_ignores_backend_when_persistence_disabled() {
    let mut backend = MemoryKeyValueStore::new();
    backend
        .set(
            "projects_showcase_app",
            &showcase_core::export_projects_as_json(&[project(1, 9)]),
        )
        .unwrap();

    let backend: Box<dyn KeyValueStore> = Box::new(backend);
    let service = ProjectService::bootstrap(&ShowcaseConfig::ephemeral(), Some(backend)).unwrap();
    assert!(service.store().is_empty());
    assert!(service.store().storage().is_none());
}

#[test]
fn bootstrap_rejects_invalid_config() {
    let config = ShowcaseConfig {
        storage_key: "Bad Key".to_string(),
        ..ShowcaseConfig::default()
    };
    let err = ProjectService::bootstrap(&config, None).unwrap_err();
    assert!(matches!(
        err,
        ProjectServiceError::InvalidConfig(ConfigError::InvalidStorageKey(_))
    ));
}
