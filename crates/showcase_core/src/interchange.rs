//! Ordering and JSON interchange helpers for project collections.
//!
//! # Responsibility
//! - Order projects by creation time without touching stored order.
//! - Serialize/deserialize whole collections for export and import.
//!
//! # Invariants
//! - Sorting is stable: equal timestamps keep their input order.
//! - `import_projects_from_json(export_projects_as_json(x)) == x`.
//! - Import is structural only; title/description rules are not re-checked.

use crate::model::project::Project;
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Creation-time ordering for [`sort_projects_by_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unsupported sort order `{other}`; expected asc|desc")),
        }
    }
}

/// Import failure for interchange text.
#[derive(Debug)]
pub enum ImportError {
    /// Text is not valid JSON.
    Parse(serde_json::Error),
    /// Top-level JSON value is not an array.
    NotAnArray,
    /// One array element does not have the project record shape.
    InvalidRecord {
        index: usize,
        source: serde_json::Error,
    },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Import failed: {err}"),
            Self::NotAnArray => write!(f, "Import failed: Invalid format: expected an array"),
            Self::InvalidRecord { index, source } => {
                write!(f, "Import failed: invalid project at index {index}: {source}")
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::NotAnArray => None,
            Self::InvalidRecord { source, .. } => Some(source),
        }
    }
}

/// Returns a copy of `projects` ordered by `created_at`.
pub fn sort_projects_by_date(projects: &[Project], order: SortOrder) -> Vec<Project> {
    let mut sorted = projects.to_vec();
    match order {
        SortOrder::Asc => sorted.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
        SortOrder::Desc => sorted.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
    }
    sorted
}

/// Serializes the collection as a pretty-printed JSON array.
pub fn export_projects_as_json(projects: &[Project]) -> String {
    // A slice of plain structs with string/number fields cannot fail to encode.
    serde_json::to_string_pretty(projects).unwrap_or_else(|_| "[]".to_string())
}

/// Parses an exported collection back into projects.
///
/// Accepts both compact and pretty-printed input.
///
/// # Errors
/// - [`ImportError::Parse`] when `text` is not JSON.
/// - [`ImportError::NotAnArray`] when the top-level value is not an array.
/// - [`ImportError::InvalidRecord`] when an element lacks a project field or
///   has a field of the wrong type.
pub fn import_projects_from_json(text: &str) -> Result<Vec<Project>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|err| {
        warn!("event=projects_import module=interchange status=error error_code=parse_failed");
        ImportError::Parse(err)
    })?;

    let Value::Array(items) = value else {
        warn!("event=projects_import module=interchange status=error error_code=not_an_array");
        return Err(ImportError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Project>(item).map_err(|source| {
                warn!(
                    "event=projects_import module=interchange status=error error_code=invalid_record index={}",
                    index
                );
                ImportError::InvalidRecord { index, source }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::SortOrder;

    #[test]
    fn sort_order_defaults_to_newest_first() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn sort_order_parses_case_insensitively() {
        assert_eq!(" ASC ".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("newest".parse::<SortOrder>().is_err());
    }
}
