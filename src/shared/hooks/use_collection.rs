use std::future::Future;

use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::models::Project;
use crate::infrastructure::api::ApiClient;
use crate::shared::state::{load_in_project, CollectionCell, CollectionSynchronizer, ScopeState, Scoped};

use super::use_app::use_api;

/// Signals are read with `peek` so async mutations never subscribe the caller.
impl<T: Clone + 'static> CollectionCell<T> for Signal<Vec<T>> {
    fn snapshot(&self) -> Vec<T> {
        self.peek().clone()
    }

    fn replace(&mut self, items: Vec<T>) {
        self.set(items);
    }
}

/// Load a project's collections whenever `project_id` changes.
///
/// `load` runs once the project is found among the user's projects and its
/// result is handed to `apply`, which writes it into the page's signals.
/// The returned state drives the page: nothing selected, loading, not
/// found, failed, or ready with the resolved project.
pub fn use_project_scope<T, L, Fut, A>(project_id: String, load: L, apply: A) -> Signal<ScopeState<Project>>
where
    T: 'static,
    L: Fn(ApiClient, Project) -> Fut + Clone + 'static,
    Fut: Future<Output = T> + 'static,
    A: Fn(T) + Clone + 'static,
{
    let api = use_api();
    let navigator = use_navigator();
    let state = use_signal(|| ScopeState::<Project>::Loading);
    let sync = use_hook(CollectionSynchronizer::new);

    {
        let sync = sync.clone();
        use_drop(move || sync.teardown());
    }

    use_effect(use_reactive!(|(project_id,)| {
        let api = api.clone();
        let sync = sync.clone();
        let load = load.clone();
        let apply = apply.clone();
        let mut state = state;

        spawn(async move {
            sync.run(
                Some(project_id.as_str()),
                move |id| async move {
                    load_in_project(api.list_projects(), &id, |project| load(api.clone(), project)).await
                },
                move |next: ScopeState<Scoped<T>>| {
                    let next = next.map(|Scoped { project, data }| {
                        apply(data);
                        project
                    });
                    if let ScopeState::Failed(err) = &next {
                        if err.is_session_expired() {
                            navigator.replace(Route::Login {});
                        }
                    }
                    state.set(next);
                },
            )
            .await;
        });
    }));

    state
}
