use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::models::Credentials;
use crate::shared::hooks::use_api;

#[component]
pub fn LoginPage() -> Element {
    let api = use_api();
    let navigator = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Already signed in
    {
        let signed_in = api.session().is_authenticated();
        use_effect(move || {
            if signed_in {
                navigator.replace(Route::Projects {});
            }
        });
    }

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let credentials = Credentials {
            email: email.read().trim().to_string(),
            password: password.read().clone(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            error.set(Some("Email and password are required".to_string()));
            return;
        }

        let api = api.clone();
        submitting.set(true);
        error.set(None);
        spawn(async move {
            match api.login(&credentials).await {
                Ok(auth) if auth.has_token() => {
                    tracing::info!("Signed in");
                    navigator.replace(Route::Projects {});
                }
                Ok(_) => error.set(Some("The server did not return a session".to_string())),
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "c-auth__card",
            h1 { class: "c-auth__title", "Sign in to MileStack" }
            form { class: "c-auth__form", onsubmit: submit,
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
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
            p { class: "c-auth__switch",
                "No account yet? "
                Link { to: Route::Signup { invite: String::new() }, "Create one" }
            }
        }
    }
}
