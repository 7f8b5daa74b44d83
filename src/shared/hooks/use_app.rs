use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::ClientConfig;
use crate::domain::models::{Project, User};
use crate::infrastructure::api::{default_transport, ApiClient};
use crate::infrastructure::storage::{default_store, ChatStore, KeyValueStore, SessionStore};
use crate::shared::state::ToastQueue;

/// Services shared by every page, provided once at the root.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub chat_store: ChatStore,
    pub toasts: Signal<ToastQueue>,
    /// The user's projects, shared by the projects board and the sidebar switcher
    pub projects: Signal<Vec<Project>>,
    /// Bumped whenever the stored user changes outside a sign-in
    pub profile_revision: Signal<u64>,
}

/// Build the context for this platform and provide it to the tree.
pub fn use_app_provider() -> AppContext {
    let toasts = use_signal(ToastQueue::default);
    let projects = use_signal(Vec::<Project>::new);
    let profile_revision = use_signal(|| 0u64);
    use_context_provider(move || {
        let config = ClientConfig::from_env();
        tracing::info!(api_base = %config.api_base, "API client configured");
        let store: Rc<dyn KeyValueStore> = default_store();
        let session = SessionStore::new(store.clone());
        AppContext {
            api: ApiClient::new(config, default_transport(), session),
            chat_store: ChatStore::new(store),
            toasts,
            projects,
            profile_revision,
        }
    })
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

pub fn use_api() -> ApiClient {
    use_app().api
}

/// Signed-in user as stored; re-read after a profile edit
pub fn use_current_user() -> Option<User> {
    let app = use_app();
    let _ = app.profile_revision.read();
    app.api.session().user()
}
