//! Project use-case service.
//!
//! # Responsibility
//! - Run the add-project flow: validate, create, add to store.
//! - Provide edit/delete/list/import/export entry points for UI callers.
//! - Catch factory and import failures at the boundary that invoked them.
//!
//! # Invariants
//! - Every record entering the store through this service has passed the
//!   validator and the factory guard.
//! - Imported records never duplicate an id already in the store.

use crate::config::{ConfigError, ShowcaseConfig};
use crate::interchange::{
    export_projects_as_json, import_projects_from_json, sort_projects_by_date, ImportError,
    SortOrder,
};
use crate::model::project::{create_project, CreateProjectError, Project, ProjectId};
use crate::model::validation::{validate_project, ProjectDraft, ValidationReport};
use crate::search::filter::SearchState;
use crate::storage::{KeyValueStore, ProjectStorage};
use crate::store::project_store::ProjectStore;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for edit and bootstrap use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    InvalidConfig(ConfigError),
    /// Draft failed field validation.
    Validation(ValidationReport),
    /// Factory guard rejected the input.
    InvalidInput(CreateProjectError),
    ProjectNotFound(ProjectId),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(err) => write!(f, "{err}"),
            Self::Validation(report) => {
                let fields = report
                    .errors
                    .values()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "invalid project: {fields}")
            }
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(err) => Some(err),
            Self::InvalidInput(err) => Some(err),
            Self::Validation(_) | Self::ProjectNotFound(_) => None,
        }
    }
}

impl From<ConfigError> for ProjectServiceError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidConfig(value)
    }
}

impl From<CreateProjectError> for ProjectServiceError {
    fn from(value: CreateProjectError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Result of one add-project form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(Project),
    /// Field-level messages to show next to the form inputs.
    Rejected(ValidationReport),
    /// General message for failures past validation.
    Failed(String),
}

/// Counts reported by [`ProjectService::import_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Records skipped because their id was already present.
    pub skipped_duplicates: usize,
}

/// Use-case facade over one session's [`ProjectStore`].
#[derive(Debug, Default)]
pub struct ProjectService {
    store: ProjectStore,
}

impl ProjectService {
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    /// Builds a session from `config`, hydrating from `backend` when
    /// persistence is enabled.
    ///
    /// # Errors
    /// - Returns `InvalidConfig` when `config` fails validation.
    pub fn bootstrap(
        config: &ShowcaseConfig,
        backend: Option<Box<dyn KeyValueStore>>,
    ) -> Result<Self, ProjectServiceError> {
        config.validate()?;

        let store = match backend {
            Some(backend) if config.persistence_enabled => ProjectStore::hydrate_from(
                ProjectStorage::with_key(backend, config.storage_key.as_str()),
            ),
            _ => ProjectStore::new(),
        };
        info!(
            "event=service_bootstrap module=service status=ok persistent={} count={}",
            store.storage().is_some(),
            store.len()
        );
        Ok(Self { store })
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProjectStore {
        &mut self.store
    }

    /// Handles an add-project form submission.
    pub fn submit(&mut self, draft: &ProjectDraft) -> SubmitOutcome {
        let report = validate_project(draft);
        if !report.is_valid {
            return SubmitOutcome::Rejected(report);
        }

        match create_project(&draft.title, &draft.description) {
            Ok(project) => {
                self.store.add(project.clone());
                SubmitOutcome::Added(project)
            }
            Err(err) => {
                warn!("event=project_submit module=service status=error error={err}");
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }

    /// Deletes one project. Returns whether a record was removed.
    pub fn delete(&mut self, id: ProjectId) -> bool {
        let existed = self.store.contains(id);
        self.store.delete(id);
        existed
    }

    /// Replaces title/description of an existing project.
    ///
    /// # Errors
    /// - `Validation` when the draft fails field validation.
    /// - `ProjectNotFound` when no project has `id`.
    pub fn update(
        &mut self,
        id: ProjectId,
        draft: &ProjectDraft,
    ) -> Result<Project, ProjectServiceError> {
        let report = validate_project(draft);
        if !report.is_valid {
            return Err(ProjectServiceError::Validation(report));
        }

        let revised = self
            .store
            .get(id)
            .ok_or(ProjectServiceError::ProjectNotFound(id))?
            .revise(&draft.title, &draft.description)?;
        self.store.update(revised.clone());
        Ok(revised)
    }

    /// Returns the projects matching the current search input.
    pub fn visible_projects(&self, search: &SearchState) -> Vec<Project> {
        search.apply(self.store.projects())
    }

    pub fn sorted(&self, order: SortOrder) -> Vec<Project> {
        sort_projects_by_date(self.store.projects(), order)
    }

    pub fn export_json(&self) -> String {
        export_projects_as_json(self.store.projects())
    }

    /// Adds every imported project whose id is not yet in the store.
    ///
    /// Nothing is added when the text fails to import. Accepted records land
    /// in a single store change.
    pub fn import_json(&mut self, text: &str) -> Result<ImportSummary, ImportError> {
        let imported = import_projects_from_json(text)?;

        let mut seen = self
            .store
            .projects()
            .iter()
            .map(Project::id)
            .collect::<HashSet<_>>();
        let mut summary = ImportSummary::default();
        let mut accepted = Vec::with_capacity(imported.len());
        for project in imported {
            if seen.insert(project.id()) {
                accepted.push(project);
            } else {
                summary.skipped_duplicates += 1;
            }
        }
        summary.imported = accepted.len();
        self.store.add_many(accepted);

        info!(
            "event=projects_import module=service status=ok imported={} skipped_duplicates={}",
            summary.imported, summary.skipped_duplicates
        );
        Ok(summary)
    }
}
