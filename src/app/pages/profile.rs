use dioxus::prelude::*;

use crate::app::components::{ErrorMessage, PageHeader};
use crate::domain::models::{PresenceStatus, ProfilePatch};
use crate::shared::hooks::{use_app, use_current_user, use_toasts};

/// Display name and presence of the signed-in user. Stored locally only.
#[component]
pub fn ProfilePage() -> Element {
    let app = use_app();
    let toaster = use_toasts();
    let me = use_current_user();
    let initial = me.as_ref().map(ProfilePatch::from_user);
    let mut form = use_signal(|| {
        initial.clone().unwrap_or(ProfilePatch {
            name: String::new(),
            status: PresenceStatus::Offline,
        })
    });
    let mut error = use_signal(|| None::<&'static str>);

    if me.is_none() {
        return rsx! {
            div { class: "c-page",
                PageHeader { title: "Profile" }
                ErrorMessage { message: "Sign in again to edit your profile." }
            }
        };
    }

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let patch = form.read().clone();
        if let Err(message) = patch.validate() {
            error.set(Some(message));
            return;
        }
        error.set(None);
        match app.api.session().update_user(&patch) {
            Ok(_) => {
                let mut revision = app.profile_revision;
                revision += 1;
                toaster.success("Profile updated", "Your changes have been saved.");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save profile");
                toaster.denied("Update failed", "Could not save your profile changes.");
            }
        }
    };

    let online = form.read().status == PresenceStatus::Online;

    rsx! {
        div { class: "c-page",
            PageHeader {
                title: "Profile",
                subtitle: "Update your name and status. This is for display purposes only.".to_string(),
            }
            form { class: "c-profile", onsubmit: submit,
                label { class: "c-field",
                    "Display name"
                    input {
                        placeholder: "Your name",
                        value: "{form.read().name}",
                        oninput: move |evt| form.write().name = evt.value(),
                    }
                }
                label { class: "c-profile__status",
                    input {
                        r#type: "checkbox",
                        checked: online,
                        onchange: move |evt| {
                            form.write().status = if evt.checked() {
                                PresenceStatus::Online
                            } else {
                                PresenceStatus::Offline
                            };
                        },
                    }
                    span { class: if online { "c-status--online" } else { "c-status--offline" },
                        if online { "You are currently online" } else { "You are currently offline" }
                    }
                }
                if let Some(message) = error() {
                    p { class: "c-field__error", "{message}" }
                }
                div { class: "c-page__actions",
                    button { class: "c-button c-button--primary", r#type: "submit", "Save changes" }
                }
            }
        }
    }
}
