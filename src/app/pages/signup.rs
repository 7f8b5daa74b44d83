use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::models::SignupRequest;
use crate::shared::hooks::{use_api, use_toasts};

/// Account creation. With `invite` set, the invited email is filled in and
/// the invite id travels with the request.
#[component]
pub fn SignupPage(invite: String) -> Element {
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toasts();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let invite_id = Some(invite.trim().to_string()).filter(|id| !id.is_empty());

    {
        let api = api.clone();
        use_effect(use_reactive!(|(invite,)| {
            let invite_id = invite.trim().to_string();
            if invite_id.is_empty() {
                return;
            }
            let api = api.clone();
            spawn(async move {
                match api.get_invite(&invite_id).await {
                    Ok(found) => {
                        email.set(found.email);
                        if let Some(invited_name) = found.name {
                            name.set(invited_name);
                        }
                    }
                    Err(e) => tracing::warn!(invite_id = %invite_id, error = %e, "Invite lookup failed"),
                }
            });
        }));
    }

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = SignupRequest {
            name: name.read().trim().to_string(),
            email: email.read().trim().to_string(),
            password: password.read().clone(),
            invite_id: invite_id.clone(),
        };
        if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
            error.set(Some("All fields are required".to_string()));
            return;
        }

        let api = api.clone();
        submitting.set(true);
        error.set(None);
        spawn(async move {
            match api.signup(&request).await {
                Ok(auth) if auth.has_token() => {
                    navigator.replace(Route::Projects {});
                }
                Ok(_) => {
                    toaster.success("Account created", "You can sign in now.");
                    navigator.replace(Route::Login {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "c-auth__card",
            h1 { class: "c-auth__title", "Create your account" }
            form { class: "c-auth__form", onsubmit: submit,
                label { class: "c-field",
                    "Name"
                    input { value: "{name}", oninput: move |evt| name.set(evt.value()) }
                }
                label { class: "c-field",
                    "Email"
                    input {
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "c-field",
                    "Password"
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "c-field__error", "{message}" }
                }
                button {
                    class: "c-button c-button--primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Creating account..." } else { "Sign up" }
                }
            }
            p { class: "c-auth__switch",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
