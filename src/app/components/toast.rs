use dioxus::prelude::*;

use crate::shared::hooks::use_toasts;

/// Stack of live toasts; click one to dismiss it early
#[component]
pub fn ToastViewport() -> Element {
    let toaster = use_toasts();
    let queue = toaster.queue();
    let toasts: Vec<_> = queue.read().iter().cloned().collect();

    rsx! {
        div { class: "c-toasts",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: "{toast.variant.css_class()}",
                    role: "status",
                    onclick: move |_| toaster.dismiss(toast.id),
                    p { class: "c-toast__title", "{toast.title}" }
                    if let Some(description) = toast.description.clone() {
                        p { "{description}" }
                    }
                }
            }
        }
    }
}
