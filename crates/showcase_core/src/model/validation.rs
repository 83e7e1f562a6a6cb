//! Field-level validation for project input.
//!
//! # Responsibility
//! - Check title/description constraints before a project is created.
//! - Report failures as structured per-field messages, never as errors.
//!
//! # Invariants
//! - The "required" and "too long" checks run independently per field; the
//!   length message wins when both apply.
//! - Lengths are counted in chars of the trimmed value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Raw form input. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Input field addressed by a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Title,
    Description,
}

/// Validation outcome with per-field messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: BTreeMap<ProjectField, String>,
}

impl ValidationReport {
    pub fn error(&self, field: ProjectField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Validates a draft against title/description rules.
pub fn validate_project(draft: &ProjectDraft) -> ValidationReport {
    let mut errors = BTreeMap::new();

    check_field(
        &mut errors,
        ProjectField::Title,
        &draft.title,
        MAX_TITLE_CHARS,
        "Title",
    );
    check_field(
        &mut errors,
        ProjectField::Description,
        &draft.description,
        MAX_DESCRIPTION_CHARS,
        "Description",
    );

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_field(
    errors: &mut BTreeMap<ProjectField, String>,
    field: ProjectField,
    value: &str,
    max_chars: usize,
    label: &str,
) {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        errors.insert(field, format!("{label} is required"));
    }

    if trimmed.chars().count() > max_chars {
        errors.insert(
            field,
            format!("{label} must be less than {max_chars} characters"),
        );
    }
}
