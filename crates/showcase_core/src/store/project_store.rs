//! Project store: owner of the collection, subscribers and persistence hook.
//!
//! # Responsibility
//! - Apply `ProjectAction`s through the pure reducer.
//! - Hand out immutable snapshots for search/sort projections.
//! - Notify subscribers and best-effort persist after each change.
//!
//! # Invariants
//! - Every change swaps in a new `Arc`; older snapshots stay untouched.
//! - Actions that leave the content unchanged keep the current snapshot and
//!   neither notify nor persist.
//! - Persistence failures are logged and never returned to callers.

use crate::model::project::{Project, ProjectId};
use crate::search::filter::search_projects;
use crate::storage::ProjectStorage;
use crate::store::action::{reduce, ProjectAction};
use log::{debug, info};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Immutable view of the collection at one point in time.
pub type ProjectSnapshot = Arc<Vec<Project>>;

/// Handle returned by [`ProjectStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Project])>;

/// Session-scoped owner of the project collection.
///
/// Constructed once per session and passed to consumers explicitly.
pub struct ProjectStore {
    projects: ProjectSnapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    storage: Option<ProjectStorage>,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ProjectStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects)
            .field("listeners", &self.listeners.len())
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}

impl ProjectStore {
    /// Creates an empty store without persistence.
    pub fn new() -> Self {
        Self::with_projects(Vec::new())
    }

    /// Creates a store seeded with `projects` (hydration/testing).
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Arc::new(projects),
            listeners: Vec::new(),
            next_subscription: 0,
            storage: None,
        }
    }

    /// Creates a store seeded from `storage` and keeps it attached.
    pub fn hydrate_from(storage: ProjectStorage) -> Self {
        let projects = storage.load_projects();
        info!(
            "event=store_hydrate module=store status=ok count={}",
            projects.len()
        );
        let mut store = Self::with_projects(projects);
        store.storage = Some(storage);
        store
    }

    /// Attaches a persistence backend, returning the previous one.
    pub fn attach_storage(&mut self, storage: ProjectStorage) -> Option<ProjectStorage> {
        self.storage.replace(storage)
    }

    pub fn detach_storage(&mut self) -> Option<ProjectStorage> {
        self.storage.take()
    }

    pub fn storage(&self) -> Option<&ProjectStorage> {
        self.storage.as_ref()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> ProjectSnapshot {
        Arc::clone(&self.projects)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Finds one project by id.
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id() == id)
    }

    pub fn contains(&self, id: ProjectId) -> bool {
        self.get(id).is_some()
    }

    /// Filters the current collection by `term`.
    pub fn search(&self, term: &str) -> Vec<Project> {
        search_projects(&self.projects, term)
    }

    pub fn add(&mut self, project: Project) -> ProjectSnapshot {
        self.dispatch(ProjectAction::Add(project))
    }

    /// Appends `projects` in one change: one notification, one save.
    pub fn add_many(&mut self, projects: Vec<Project>) -> ProjectSnapshot {
        self.dispatch(ProjectAction::AddMany(projects))
    }

    pub fn delete(&mut self, id: ProjectId) -> ProjectSnapshot {
        self.dispatch(ProjectAction::Delete(id))
    }

    pub fn update(&mut self, project: Project) -> ProjectSnapshot {
        self.dispatch(ProjectAction::Update(project))
    }

    /// Applies one action and returns the resulting snapshot.
    pub fn dispatch(&mut self, action: ProjectAction) -> ProjectSnapshot {
        if matches!(action, ProjectAction::Unrecognized) {
            debug!("event=store_dispatch module=store status=skipped action=unrecognized");
            return self.snapshot();
        }

        let next = reduce(&self.projects, &action);
        if next == *self.projects {
            debug!(
                "event=store_dispatch module=store status=noop action={} project_id={}",
                action.kind(),
                format_id(action.project_id())
            );
            return self.snapshot();
        }

        self.projects = Arc::new(next);
        info!(
            "event=store_dispatch module=store status=ok action={} project_id={} count={}",
            action.kind(),
            format_id(action.project_id()),
            self.projects.len()
        );

        self.persist();
        self.notify();
        self.snapshot()
    }

    /// Registers a listener called with the collection after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Project]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn persist(&mut self) {
        if let Some(storage) = self.storage.as_mut() {
            storage.save_projects(&self.projects);
        }
    }

    fn notify(&mut self) {
        let snapshot = Arc::clone(&self.projects);
        for (_, listener) in &mut self.listeners {
            listener(snapshot.as_slice());
        }
    }
}

fn format_id(id: Option<ProjectId>) -> String {
    id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::ProjectStore;
    use crate::model::project::{Project, ProjectId};
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn project(id: i64) -> Project {
        Project::with_id(
            ProjectId(id),
            format!("Project {id}"),
            "description",
            Utc.with_ymd_and_hms(2026, 2, 8, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn noop_delete_keeps_current_snapshot() {
        let mut store = ProjectStore::with_projects(vec![project(1)]);
        let before = store.snapshot();
        let after = store.delete(ProjectId(42));
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut store = ProjectStore::new();

        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);
        store.add(project(1));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add(project(2));

        assert_eq!(*calls.borrow(), 1);
    }
}
