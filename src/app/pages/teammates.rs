use dioxus::prelude::*;

use crate::app::components::{DeleteButton, EmptyState, PageHeader, ScopeNotice};
use crate::app::routes::Route;
use crate::domain::models::{is_valid_email, Invite, InviteRequest, InviteStatus, PresenceStatus, User};
use crate::domain::services::Team;
use crate::shared::errors::ApiError;
use crate::shared::hooks::{report_api_error, use_api, use_current_user, use_project_scope, use_toasts};
use crate::shared::state::{confirmed_create, ScopeState};

#[component]
pub fn TeammatesPage(project_id: String) -> Element {
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toasts();
    let me = use_current_user();
    let mut team = use_signal(Team::default);
    let mut invites = use_signal(Vec::<Invite>::new);
    let mut invite_email = use_signal(String::new);
    let mut invite_name = use_signal(String::new);
    let mut invite_error = use_signal(|| None::<&'static str>);
    let mut inviting = use_signal(|| false);

    let scope = use_project_scope(
        project_id.clone(),
        |api, project| async move { api.load_team_page(&project.id).await },
        move |(loaded_team, loaded_invites): (Result<Team, ApiError>, Result<Vec<Invite>, ApiError>)| {
            let (mut team, mut invites) = (team, invites);
            match loaded_team {
                Ok(loaded) => team.set(loaded),
                Err(err) => {
                    team.set(Team::default());
                    report_api_error(&toaster, &navigator, "Could not load teammates", &err);
                }
            }
            match loaded_invites {
                Ok(list) => invites.set(list),
                Err(err) => {
                    invites.set(Vec::new());
                    tracing::warn!(error = %err, "Pending invites unavailable");
                }
            }
        },
    );

    let send_invite = {
        let api = api.clone();
        let project_id = project_id.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let email = invite_email.read().trim().to_string();
            if !is_valid_email(&email) {
                invite_error.set(Some("Enter a valid email address"));
                return;
            }
            invite_error.set(None);
            inviting.set(true);

            let request = InviteRequest::new(project_id.clone(), &email, &invite_name.read());
            let api = api.clone();
            spawn(async move {
                match confirmed_create(&mut invites, api.invite_teammate(&request)).await {
                    Ok(invite) => {
                        toaster.success("Invite sent", invite.email);
                        invite_email.set(String::new());
                        invite_name.set(String::new());
                    }
                    Err(err) => report_api_error(&toaster, &navigator, "Could not send invite", &err),
                }
                inviting.set(false);
            });
        }
    };

    let remove = {
        let api = api.clone();
        let project_id = project_id.clone();
        let actor_id = me.as_ref().map(|user| user.id.clone()).unwrap_or_default();
        move |target: User| {
            if let Err(denied) = team.peek().check_removal(&actor_id, &target.id) {
                toaster.denied("Cannot remove teammate", denied.to_string());
                return;
            }

            let api = api.clone();
            let project_id = project_id.clone();
            let leaving = target.id == actor_id;
            spawn(async move {
                match api.remove_teammate(&target.id, &project_id).await {
                    Ok(()) => {
                        team.write().remove_member(&target.id);
                        if leaving {
                            toaster.success("You left the project", "");
                            navigator.replace(Route::Projects {});
                        } else {
                            toaster.success("Teammate removed", target.name.clone());
                        }
                    }
                    Err(err) => report_api_error(&toaster, &navigator, "Could not remove teammate", &err),
                }
            });
        }
    };

    let state = scope();
    let ScopeState::Ready(project) = state.clone() else {
        return rsx! {
            ScopeNotice { state, noun: "teammates" }
        };
    };

    let roster: Vec<User> = team.read().roster().into_iter().cloned().collect();
    let pending: Vec<Invite> = invites
        .read()
        .iter()
        .filter(|invite| invite.status == InviteStatus::Pending)
        .cloned()
        .collect();
    let my_id = me.map(|user| user.id).unwrap_or_default();

    rsx! {
        div { class: "c-page",
            PageHeader { title: project.title.clone(), subtitle: format!("{} teammates", roster.len()) }

            section { class: "c-card",
                h2 { class: "c-card__title", "Team" }
                if roster.is_empty() {
                    EmptyState { message: "No teammates yet" }
                }
                ul { class: "c-roster",
                    for user in roster {
                        {
                            let is_leader = team.read().is_leader(&user.id);
                            let remove = remove.clone();
                            let target = user.clone();
                            let label = if user.id == my_id { "Leave" } else { "Remove" };
                            rsx! {
                                li { key: "{user.id}", class: "c-roster__item",
                                    span { class: "c-avatar", "{user.display_initials()}" }
                                    div { class: "c-roster__info",
                                        strong { "{user.name}" }
                                        span { class: "c-item-card__meta", "{user.email}" }
                                    }
                                    span {
                                        class: if user.status == PresenceStatus::Online { "c-status--online" } else { "c-status--offline" },
                                        if user.status == PresenceStatus::Online { "online" } else { "offline" }
                                    }
                                    if is_leader {
                                        span { class: "c-roster__badge", "Leader" }
                                    } else {
                                        DeleteButton {
                                            label,
                                            confirm_text: "Remove from this project?",
                                            on_confirm: move |_| remove(target.clone()),
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section { class: "c-card",
                h2 { class: "c-card__title", "Invite a teammate" }
                form { class: "c-auth__form", onsubmit: send_invite,
                    label { class: "c-field",
                        "Email"
                        input {
                            r#type: "email",
                            value: "{invite_email}",
                            oninput: move |evt| invite_email.set(evt.value()),
                        }
                    }
                    label { class: "c-field",
                        "Name (optional)"
                        input {
                            value: "{invite_name}",
                            oninput: move |evt| invite_name.set(evt.value()),
                        }
                    }
                    if let Some(message) = invite_error() {
                        p { class: "c-field__error", "{message}" }
                    }
                    button {
                        class: "c-button c-button--primary",
                        r#type: "submit",
                        disabled: inviting(),
                        if inviting() { "Sending..." } else { "Send invite" }
                    }
                }
            }

            section { class: "c-card",
                h2 { class: "c-card__title", "Pending invites" }
                if pending.is_empty() {
                    EmptyState { message: "No pending invites" }
                }
                ul { class: "c-roster",
                    for invite in pending {
                        li { key: "{invite.id}", class: "c-roster__item",
                            span { "{invite.email}" }
                            if let Some(name) = invite.name.clone() {
                                span { class: "c-item-card__meta", "{name}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
