//! Case-insensitive substring filter over projects.
//!
//! # Responsibility
//! - Select projects whose title or description contains a search term.
//!
//! # Invariants
//! - Input order is preserved; matching is binary, never ranked.
//! - A blank term selects every project.
//! - The input slice is never modified.

use crate::model::project::Project;

/// Returns every project whose title or description contains `term`,
/// ignoring case.
///
/// Blank terms (empty after trimming) return a copy of `projects`.
pub fn search_projects(projects: &[Project], term: &str) -> Vec<Project> {
    if term.trim().is_empty() {
        return projects.to_vec();
    }

    let needle = term.to_lowercase();
    projects
        .iter()
        .filter(|project| matches_term(project, &needle))
        .cloned()
        .collect()
}

fn matches_term(project: &Project, lowercase_term: &str) -> bool {
    project.title().to_lowercase().contains(lowercase_term)
        || project.description().to_lowercase().contains(lowercase_term)
}

/// Current search input of one list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    term: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn clear(&mut self) {
        self.term.clear();
    }

    /// Returns whether the term narrows the list at all.
    pub fn is_active(&self) -> bool {
        !self.term.trim().is_empty()
    }

    /// Applies the current term to `projects`.
    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        search_projects(projects, &self.term)
    }
}
