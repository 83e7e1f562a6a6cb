//! Core domain logic for the project showcase.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod interchange;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{ConfigError, ShowcaseConfig};
pub use interchange::{
    export_projects_as_json, import_projects_from_json, sort_projects_by_date, ImportError,
    SortOrder,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{
    create_project, create_project_with, ClockIdSource, CreateProjectError, IdSource, Project,
    ProjectId,
};
pub use model::validation::{
    validate_project, ProjectDraft, ProjectField, ValidationReport, MAX_DESCRIPTION_CHARS,
    MAX_TITLE_CHARS,
};
pub use search::filter::{search_projects, SearchState};
pub use service::project_service::{
    ImportSummary, ProjectService, ProjectServiceError, SubmitOutcome,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, ProjectStorage, SqliteKeyValueStore, StorageError,
    StorageInfo, StorageResult, DEFAULT_STORAGE_KEY,
};
pub use store::action::{reduce, ProjectAction};
pub use store::project_store::{ProjectSnapshot, ProjectStore, SubscriptionId};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
