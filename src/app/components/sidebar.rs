use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::shared::hooks::{use_api, use_app, use_current_user};

/// Project id of the current route, if it is project-scoped
fn route_project(route: &Route) -> Option<String> {
    match route {
        Route::Dashboard { project_id }
        | Route::Milestones { project_id }
        | Route::Teammates { project_id }
        | Route::Activity { project_id } => Some(project_id.clone()).filter(|id| !id.is_empty()),
        _ => None,
    }
}

#[component]
pub fn AppSidebar() -> Element {
    let api = use_api();
    let user = use_current_user();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let current_project = route_project(&route);
    let mut projects = use_app().projects;

    // Project switcher options, kept current by the projects board; failures
    // only cost the dropdown
    {
        let api = api.clone();
        use_effect(move || {
            let api = api.clone();
            spawn(async move {
                match api.list_projects().await {
                    Ok(list) => projects.set(list),
                    Err(e) => tracing::warn!(error = %e, "Failed to load sidebar projects"),
                }
            });
        });
    }

    let selected = current_project.clone().unwrap_or_default();

    rsx! {
        aside { class: "c-sidebar",
            div { class: "c-sidebar__brand", "MileStack" }

            select {
                class: "c-sidebar__select",
                value: "{selected}",
                onchange: move |evt| {
                    let project_id = evt.value();
                    if !project_id.is_empty() {
                        navigator.push(Route::Dashboard { project_id });
                    }
                },
                option { value: "", disabled: true, "Select a project" }
                for project in projects.read().iter() {
                    option {
                        key: "{project.id}",
                        value: "{project.id}",
                        selected: project.id == selected,
                        "{project.title}"
                    }
                }
            }

            nav { class: "c-sidebar__nav",
                Link { to: Route::Projects {}, class: "c-sidebar__nav-item", "Projects" }
                if let Some(project_id) = current_project {
                    Link {
                        to: Route::Dashboard { project_id: project_id.clone() },
                        class: "c-sidebar__nav-item",
                        "Dashboard"
                    }
                    Link {
                        to: Route::Milestones { project_id: project_id.clone() },
                        class: "c-sidebar__nav-item",
                        "Milestones"
                    }
                    Link {
                        to: Route::Teammates { project_id: project_id.clone() },
                        class: "c-sidebar__nav-item",
                        "Teammates"
                    }
                    Link {
                        to: Route::Activity { project_id: project_id.clone() },
                        class: "c-sidebar__nav-item",
                        "Activity"
                    }
                }
                Link { to: Route::Chat {}, class: "c-sidebar__nav-item", "Chat" }
                Link { to: Route::Profile {}, class: "c-sidebar__nav-item", "Profile" }
            }

            div { class: "c-sidebar__footer",
                if let Some(user) = user {
                    div { class: "c-roster__item",
                        span { class: "c-avatar", "{user.display_initials()}" }
                        span { "{user.name}" }
                    }
                }
                button {
                    class: "c-button c-button--secondary",
                    onclick: move |_| {
                        api.logout();
                        navigator.replace(Route::Login {});
                    },
                    "Log out"
                }
            }
        }
    }
}
