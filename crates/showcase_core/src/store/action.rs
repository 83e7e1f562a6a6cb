//! Store actions and the pure reducer.
//!
//! # Invariants
//! - `reduce` never mutates its input.
//! - `Delete`/`Update` without a matching id leave the collection unchanged.
//! - `Update` never inserts.

use crate::model::project::{Project, ProjectId};
use serde::{Deserialize, Serialize};

/// One collection mutation.
///
/// Serialized as `{"type": "...", "payload": ...}`; unknown `type` tags decode
/// to [`ProjectAction::Unrecognized`] and reduce to a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ProjectAction {
    #[serde(rename = "ADD_PROJECT")]
    Add(Project),
    /// Appends several records in one transition (bulk import).
    #[serde(rename = "ADD_PROJECTS")]
    AddMany(Vec<Project>),
    #[serde(rename = "DELETE_PROJECT")]
    Delete(ProjectId),
    #[serde(rename = "UPDATE_PROJECT")]
    Update(Project),
    #[serde(other)]
    Unrecognized,
}

impl ProjectAction {
    /// Short stable name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::AddMany(_) => "add_many",
            Self::Delete(_) => "delete",
            Self::Update(_) => "update",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Id the action targets, if any.
    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Self::Add(project) | Self::Update(project) => Some(project.id()),
            Self::Delete(id) => Some(*id),
            Self::AddMany(_) | Self::Unrecognized => None,
        }
    }
}

/// Computes the next collection for `action`.
pub fn reduce(state: &[Project], action: &ProjectAction) -> Vec<Project> {
    match action {
        ProjectAction::Add(project) => {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.extend_from_slice(state);
            next.push(project.clone());
            next
        }
        ProjectAction::AddMany(projects) => {
            let mut next = Vec::with_capacity(state.len() + projects.len());
            next.extend_from_slice(state);
            next.extend_from_slice(projects);
            next
        }
        ProjectAction::Delete(id) => state
            .iter()
            .filter(|project| project.id() != *id)
            .cloned()
            .collect(),
        ProjectAction::Update(replacement) => state
            .iter()
            .map(|project| {
                if project.id() == replacement.id() {
                    replacement.clone()
                } else {
                    project.clone()
                }
            })
            .collect(),
        ProjectAction::Unrecognized => state.to_vec(),
    }
}
