//! Project domain model and factory.
//!
//! # Responsibility
//! - Define the single showcase record (`Project`) and its stable id.
//! - Construct normalized records from raw user input.
//!
//! # Invariants
//! - Factory-built projects store trimmed, non-empty title/description.
//! - `ProjectId` values handed out by one id source are strictly increasing.
//! - `created_at` is truncated to milliseconds so interchange round-trips are
//!   lossless.

use chrono::{DateTime, SubsecRound, Utc};
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};

/// Stable identifier of one project, serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub i64);

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProjectId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Source of fresh project ids.
pub trait IdSource {
    fn next_id(&self) -> ProjectId;
}

/// Millisecond-clock id source.
///
/// Yields `max(now_ms, last + 1)`, so two projects created within the same
/// millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct ClockIdSource {
    last: AtomicI64,
}

impl ClockIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for ClockIdSource {
    fn next_id(&self) -> ProjectId {
        let now_ms = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return ProjectId(candidate),
                Err(actual) => last = actual,
            }
        }
    }
}

static PROCESS_ID_SOURCE: Lazy<ClockIdSource> = Lazy::new(ClockIdSource::new);

/// Factory guard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateProjectError {
    /// Title or description is empty after trimming.
    InvalidInput,
}

impl Display for CreateProjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "Title and description are required"),
        }
    }
}

impl Error for CreateProjectError {}

/// One showcased project.
///
/// Fields are read-only after construction; replacements go through
/// [`Project::revise`] and the store's update action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    title: String,
    description: String,
    #[serde(with = "iso_millis")]
    created_at: DateTime<Utc>,
}

impl Project {
    /// Builds a record from already-known parts.
    ///
    /// Used by hydration/import paths where identity already exists.
    /// This constructor does not trim or validate; `created_at` is truncated
    /// to milliseconds like every other stored timestamp.
    pub fn with_id(
        id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            created_at: created_at.trunc_subsecs(3),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a replacement record with the same id and creation time.
    ///
    /// Applies the same guard and trimming as [`create_project`].
    pub fn revise(&self, title: &str, description: &str) -> Result<Self, CreateProjectError> {
        let (title, description) = normalize_required(title, description)?;
        Ok(Self {
            id: self.id,
            title,
            description,
            created_at: self.created_at,
        })
    }
}

/// Creates a project with a fresh process-wide id and the current time.
///
/// Callers are expected to run [`crate::validate_project`] first; this guard
/// only rejects blank input.
pub fn create_project(title: &str, description: &str) -> Result<Project, CreateProjectError> {
    create_project_with(title, description, &*PROCESS_ID_SOURCE, Utc::now())
}

/// Creates a project from an explicit id source and creation time.
pub fn create_project_with(
    title: &str,
    description: &str,
    ids: &dyn IdSource,
    created_at: DateTime<Utc>,
) -> Result<Project, CreateProjectError> {
    let (title, description) = normalize_required(title, description)?;
    let project = Project {
        id: ids.next_id(),
        title,
        description,
        created_at: created_at.trunc_subsecs(3),
    };
    debug!(
        "event=project_create module=model status=ok project_id={}",
        project.id
    );
    Ok(project)
}

fn normalize_required(
    title: &str,
    description: &str,
) -> Result<(String, String), CreateProjectError> {
    let title = title.trim();
    let description = description.trim();
    if title.is_empty() || description.is_empty() {
        return Err(CreateProjectError::InvalidInput);
    }
    Ok((title.to_string(), description.to_string()))
}

/// ISO-8601 UTC timestamps with millisecond precision and a `Z` suffix.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(|err| serde::de::Error::custom(format!("invalid createdAt `{raw}`: {err}")))
    }
}
