//! Keeps project-scoped collections in step with the selected project.
//!
//! Every load takes a generation number. A result is applied only if its
//! generation is still the latest and the owning view is still mounted, so
//! a slow response for a previous project can never overwrite the current one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::models::Project;
use crate::shared::errors::ApiError;
use crate::shared::logging;

#[derive(Debug, Clone, PartialEq)]
pub enum ScopeState<T> {
    /// No project selected
    NoParent,
    Loading,
    /// The selected id is not among the user's projects
    NotFound,
    /// The project list itself could not be fetched
    Failed(ApiError),
    Ready(T),
}

impl<T> ScopeState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScopeState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ScopeState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScopeState<U> {
        match self {
            ScopeState::NoParent => ScopeState::NoParent,
            ScopeState::Loading => ScopeState::Loading,
            ScopeState::NotFound => ScopeState::NotFound,
            ScopeState::Failed(err) => ScopeState::Failed(err),
            ScopeState::Ready(value) => ScopeState::Ready(f(value)),
        }
    }
}

/// A resolved project together with the collections loaded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoped<T> {
    pub project: Project,
    pub data: T,
}

#[derive(Debug, Clone)]
pub struct CollectionSynchronizer {
    generation: Arc<AtomicU64>,
    mounted: Arc<AtomicBool>,
}

impl Default for CollectionSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof of which load a result belongs to.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    parent_id: String,
    owner: CollectionSynchronizer,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn is_current(&self) -> bool {
        self.owner.is_mounted() && self.owner.current_generation() == self.generation
    }
}

impl CollectionSynchronizer {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Start a load for `parent_id`, superseding every earlier one.
    pub fn begin(&self, parent_id: &str) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            parent_id: parent_id.to_string(),
            owner: self.clone(),
        }
    }

    /// Make every in-flight load stale without starting a new one.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Called when the owning view goes away; nothing is applied afterwards.
    pub fn teardown(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.invalidate();
    }

    /// Load collections for `parent_id` and hand each state change to `apply`.
    ///
    /// Without a parent the state becomes [`ScopeState::NoParent`] and no
    /// fetch is issued. Otherwise `apply` sees `Loading`, then the loader's
    /// result, unless a newer run or teardown happened in between.
    pub async fn run<T, F, Fut, A>(&self, parent_id: Option<&str>, loader: F, mut apply: A)
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = ScopeState<T>>,
        A: FnMut(ScopeState<T>),
    {
        let Some(parent_id) = parent_id.map(str::trim).filter(|id| !id.is_empty()) else {
            self.invalidate();
            if self.is_mounted() {
                apply(ScopeState::NoParent);
            }
            return;
        };

        let ticket = self.begin(parent_id);
        if !ticket.is_current() {
            return;
        }
        logging::log_load_start(parent_id, ticket.generation());
        apply(ScopeState::Loading);

        let state = loader(parent_id.to_string()).await;

        if ticket.is_current() {
            apply(state);
        } else {
            let reason = if self.is_mounted() { "superseded" } else { "unmounted" };
            logging::log_load_discarded(ticket.parent_id(), ticket.generation(), reason);
        }
    }
}

/// Resolve `project_id` against the user's projects, then load its collections.
pub async fn load_in_project<T, P, F, Fut>(projects: P, project_id: &str, load: F) -> ScopeState<Scoped<T>>
where
    P: Future<Output = Result<Vec<Project>, ApiError>>,
    F: FnOnce(Project) -> Fut,
    Fut: Future<Output = T>,
{
    let projects = match projects.await {
        Ok(projects) => projects,
        Err(err) => {
            logging::log_load_error(project_id, "projects", &err.to_string());
            return ScopeState::Failed(err);
        }
    };

    match projects.into_iter().find(|project| project.id == project_id) {
        Some(project) => {
            let data = load(project.clone()).await;
            ScopeState::Ready(Scoped { project, data })
        }
        None => ScopeState::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tokio::sync::oneshot;

    use super::*;
    use crate::domain::models::ProjectStatus;

    fn project(id: &str) -> Project {
        Project {
            id: id.into(),
            title: format!("Project {}", id),
            description: None,
            status: ProjectStatus::Running,
        }
    }

    fn recorder<T>() -> (Rc<RefCell<Vec<ScopeState<T>>>>, impl FnMut(ScopeState<T>)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |state| sink.borrow_mut().push(state))
    }

    #[tokio::test]
    async fn test_no_parent_skips_fetch() {
        let sync = CollectionSynchronizer::new();
        let (seen, apply) = recorder::<Vec<String>>();
        let mut fetched = false;

        sync.run(
            None,
            |_| {
                fetched = true;
                async { ScopeState::Ready(vec![]) }
            },
            apply,
        )
        .await;

        assert!(!fetched);
        assert_eq!(*seen.borrow(), vec![ScopeState::NoParent]);
    }

    #[tokio::test]
    async fn test_blank_parent_counts_as_none() {
        let sync = CollectionSynchronizer::new();
        let (seen, apply) = recorder::<u8>();

        sync.run(Some("  "), |_| async { ScopeState::Ready(1) }, apply).await;

        assert_eq!(*seen.borrow(), vec![ScopeState::NoParent]);
    }

    #[tokio::test]
    async fn test_loading_then_ready() {
        let sync = CollectionSynchronizer::new();
        let (seen, apply) = recorder::<String>();

        sync.run(Some("p1"), |id| async move { ScopeState::Ready(id) }, apply)
            .await;

        assert_eq!(
            *seen.borrow(),
            vec![ScopeState::Loading, ScopeState::Ready("p1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let sync = CollectionSynchronizer::new();
        let visible: Rc<RefCell<Option<Vec<&str>>>> = Rc::new(RefCell::new(None));
        let (slow_tx, slow_rx) = oneshot::channel::<Vec<&str>>();
        let (fast_tx, fast_rx) = oneshot::channel::<Vec<&str>>();

        let sink_a = visible.clone();
        let load_a = sync.run(
            Some("A"),
            |_| async move { ScopeState::Ready(slow_rx.await.unwrap_or_default()) },
            move |state| {
                if let ScopeState::Ready(items) = state {
                    *sink_a.borrow_mut() = Some(items);
                }
            },
        );

        let sink_b = visible.clone();
        let load_b = sync.run(
            Some("B"),
            |_| async move { ScopeState::Ready(fast_rx.await.unwrap_or_default()) },
            move |state| {
                if let ScopeState::Ready(items) = state {
                    *sink_b.borrow_mut() = Some(items);
                }
            },
        );

        let resolve = async {
            tokio::task::yield_now().await;
            fast_tx.send(vec!["b-task"]).unwrap();
            tokio::task::yield_now().await;
            slow_tx.send(vec!["a-task"]).unwrap();
        };

        futures::join!(load_a, load_b, resolve);

        assert_eq!(*visible.borrow(), Some(vec!["b-task"]));
    }

    #[tokio::test]
    async fn test_teardown_drops_pending_result() {
        let sync = CollectionSynchronizer::new();
        let (seen, apply) = recorder::<u8>();
        let (tx, rx) = oneshot::channel::<u8>();

        let load = sync.run(
            Some("p1"),
            |_| async move { ScopeState::Ready(rx.await.unwrap_or(0)) },
            apply,
        );
        let unmount = async {
            tokio::task::yield_now().await;
            sync.teardown();
            tx.send(7).unwrap();
        };

        futures::join!(load, unmount);

        assert_eq!(*seen.borrow(), vec![ScopeState::Loading]);
        assert!(!sync.is_mounted());
    }

    #[test]
    fn test_map_only_touches_ready() {
        assert_eq!(ScopeState::Ready(2).map(|n| n * 10), ScopeState::Ready(20));
        assert_eq!(ScopeState::<u8>::NotFound.map(|n| n + 1), ScopeState::NotFound);
        assert!(ScopeState::<u8>::Loading.map(|n| n + 1).is_loading());
    }

    #[tokio::test]
    async fn test_load_in_project_resolves_states() {
        let found = load_in_project(async { Ok::<_, ApiError>(vec![project("p1"), project("p2")]) }, "p2", |p| async move {
            p.title.len()
        })
        .await;
        assert_eq!(
            found,
            ScopeState::Ready(Scoped {
                project: project("p2"),
                data: "Project p2".len(),
            })
        );

        let missing = load_in_project(async { Ok::<_, ApiError>(vec![project("p1")]) }, "p9", |_| async { 0usize }).await;
        assert_eq!(missing, ScopeState::NotFound);

        let failed = load_in_project(
            async { Err::<Vec<Project>, _>(ApiError::Unauthorized("Unauthorized".into())) },
            "p1",
            |_| async { 0usize },
        )
        .await;
        assert!(matches!(failed, ScopeState::Failed(ApiError::Unauthorized(_))));
    }
}
