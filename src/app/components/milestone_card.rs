use dioxus::prelude::*;

use crate::domain::models::Milestone;

use super::{Button, ButtonVariant, DeleteButton};

#[component]
pub fn MilestoneCard(
    milestone: Milestone,
    on_edit: EventHandler<Milestone>,
    on_delete: EventHandler<String>,
) -> Element {
    let delete_id = milestone.id.clone();
    let edit_target = milestone.clone();
    let status = milestone.status.clone().unwrap_or_else(|| "pending".to_string());

    rsx! {
        article { class: "c-card",
            header { class: "c-card__header",
                h3 { class: "c-card__title", "{milestone.title}" }
                span { class: "c-item-card__meta", "Due {milestone.due_date} · {status}" }
            }
            div { class: "c-card__body",
                if !milestone.description.is_empty() {
                    p { "{milestone.description}" }
                }
                div { class: "c-progress",
                    div {
                        class: "c-progress__bar",
                        style: "width: {milestone.progress}%",
                    }
                }
                span { class: "c-item-card__meta", "{milestone.progress}% complete" }
            }
            div { class: "c-item-card__actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    "Edit"
                }
                DeleteButton {
                    confirm_text: "Delete this milestone?",
                    on_confirm: move |_| on_delete.call(delete_id.clone()),
                }
            }
        }
    }
}
