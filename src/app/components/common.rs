use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::models::Project;
use crate::shared::state::ScopeState;

// Reusable Loading Component (BEM: c-loading)
#[component]
pub fn LoadingText(message: String) -> Element {
    rsx! {
        div { class: "c-loading",
            div { class: "c-loading__spinner" }
            p { class: "c-loading__text", "{message}" }
        }
    }
}

// Reusable Error Message Component (BEM: c-error)
#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div { class: "c-error",
            p { class: "c-error__text", "{message}" }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}

/// Everything a project-scoped page shows before its data is ready.
///
/// Renders nothing once the scope is ready so the page can draw itself.
#[component]
pub fn ScopeNotice(state: ScopeState<Project>, noun: &'static str) -> Element {
    match state {
        ScopeState::Ready(_) => rsx! {},
        ScopeState::Loading => rsx! {
            LoadingText { message: format!("Loading {}...", noun) }
        },
        ScopeState::NoParent => rsx! {
            div { class: "c-notice",
                h2 { "No project selected" }
                p { "Pick a project to see its {noun}." }
                Link { to: Route::Projects {}, class: "c-button c-button--primary", "Go to projects" }
            }
        },
        ScopeState::NotFound => rsx! {
            div { class: "c-notice",
                h2 { "Project not found" }
                p { "This project does not exist or you do not have access to it." }
                Link { to: Route::Projects {}, class: "c-button c-button--secondary", "Back to projects" }
            }
        },
        ScopeState::Failed(err) => rsx! {
            ErrorMessage { message: err.to_string() }
        },
    }
}

/// Page title row with an optional action slot
#[component]
pub fn PageHeader(title: String, subtitle: Option<String>, children: Element) -> Element {
    rsx! {
        header { class: "c-page__header",
            div {
                h1 { "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "c-page__subtitle", "{subtitle}" }
                }
            }
            div { class: "c-page__actions", {children} }
        }
    }
}
