use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};

/// Two-step delete: the first click asks, the second calls `on_confirm`.
#[component]
pub fn DeleteButton(
    on_confirm: EventHandler<()>,
    #[props(default = false)]
    is_loading: bool,
    #[props(default = "Delete")]
    label: &'static str,
    #[props(default = "Delete this item?")]
    confirm_text: &'static str,
) -> Element {
    let mut asking = use_signal(|| false);

    if !asking() {
        return rsx! {
            Button {
                variant: ButtonVariant::Danger,
                busy: is_loading,
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    asking.set(true);
                },
                "{label}"
            }
        };
    }

    rsx! {
        div { class: "c-delete-btn__confirm-overlay",
            span { "{confirm_text}" }
            Button {
                variant: ButtonVariant::Danger,
                busy: is_loading,
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    asking.set(false);
                    on_confirm.call(());
                },
                "Yes"
            }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    asking.set(false);
                },
                "No"
            }
        }
    }
}
