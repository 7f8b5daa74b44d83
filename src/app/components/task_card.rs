use dioxus::prelude::*;

use crate::domain::models::{Task, User};
use crate::shared::state::DragPayload;

use super::board::{end_drag, start_drag};
use super::{Button, ButtonVariant, DeleteButton};

#[component]
pub fn TaskCard(
    task: Task,
    assignee: Option<User>,
    dragging: Signal<DragPayload>,
    on_edit: EventHandler<Task>,
    on_delete: EventHandler<String>,
) -> Element {
    let drag_id = task.id.clone();
    let delete_id = task.id.clone();
    let edit_target = task.clone();
    let priority = task.priority.as_str();

    rsx! {
        article {
            class: "c-item-card",
            draggable: "true",
            ondragstart: move |_| start_drag(dragging, &drag_id),
            ondragend: move |_| end_drag(dragging),
            div { class: "c-item-card__title", "{task.title}" }
            if let Some(description) = task.description.clone() {
                p { class: "c-item-card__meta", "{description}" }
            }
            div { class: "c-item-card__meta",
                span { class: "c-priority--{priority}", "{priority}" }
                if let Some(user) = assignee {
                    span { class: "c-avatar", title: "{user.name}", "{user.display_initials()}" }
                }
            }
            div { class: "c-item-card__actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    "Edit"
                }
                DeleteButton {
                    confirm_text: "Delete this task?",
                    on_confirm: move |_| on_delete.call(delete_id.clone()),
                }
            }
        }
    }
}
