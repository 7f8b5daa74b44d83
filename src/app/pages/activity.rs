use dioxus::prelude::*;

use crate::app::components::{EmptyState, PageHeader, ScopeNotice};
use crate::domain::models::Activity;
use crate::domain::services::Team;
use crate::shared::errors::ApiError;
use crate::shared::hooks::{report_api_error, use_project_scope, use_toasts};
use crate::shared::state::ScopeState;

/// Read-only feed of what happened in a project.
#[component]
pub fn ActivityPage(project_id: String) -> Element {
    let navigator = use_navigator();
    let toaster = use_toasts();
    let activities = use_signal(Vec::<Activity>::new);
    let team = use_signal(Team::default);

    let scope = use_project_scope(
        project_id,
        |api, project| async move { api.load_activity_feed(&project.id).await },
        move |(loaded, loaded_team): (Result<Vec<Activity>, ApiError>, Result<Team, ApiError>)| {
            let (mut activities, mut team) = (activities, team);
            match loaded {
                Ok(list) => activities.set(list),
                Err(err) => {
                    activities.set(Vec::new());
                    report_api_error(&toaster, &navigator, "Could not load activity", &err);
                }
            }
            // Unknown senders render as "Someone"
            team.set(loaded_team.unwrap_or_default());
        },
    );

    let state = scope();
    let ScopeState::Ready(project) = state.clone() else {
        return rsx! {
            ScopeNotice { state, noun: "activity" }
        };
    };

    let team = team.read();

    rsx! {
        div { class: "c-page",
            PageHeader { title: project.title.clone(), subtitle: "Recent activity".to_string() }

            if activities.read().is_empty() {
                EmptyState { message: "Nothing has happened yet" }
            }
            ol { class: "c-feed",
                for activity in activities.read().iter() {
                    li { key: "{activity.id}", class: "c-feed__item",
                        strong { class: "c-feed__who", "{team.display_name(&activity.user_id)}" }
                        span { class: "c-feed__what", " {activity.description}" }
                        time { class: "c-feed__time", datetime: "{activity.timestamp}", "{activity.display_time()}" }
                    }
                }
            }
        }
    }
}
