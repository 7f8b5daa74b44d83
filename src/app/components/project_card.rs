use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::models::Project;
use crate::shared::state::DragPayload;

use super::board::{end_drag, start_drag};
use super::{Button, ButtonVariant, DeleteButton};

#[component]
pub fn ProjectCard(
    project: Project,
    dragging: Signal<DragPayload>,
    on_edit: EventHandler<Project>,
    on_delete: EventHandler<String>,
) -> Element {
    let id = project.id.clone();
    let drag_id = id.clone();
    let delete_id = id.clone();
    let edit_target = project.clone();

    rsx! {
        article {
            class: "c-item-card",
            draggable: "true",
            ondragstart: move |_| start_drag(dragging, &drag_id),
            ondragend: move |_| end_drag(dragging),
            Link {
                to: Route::Dashboard { project_id: id.clone() },
                class: "c-item-card__title",
                "{project.title}"
            }
            if let Some(description) = project.description.clone() {
                p { class: "c-item-card__meta", "{description}" }
            }
            div { class: "c-item-card__actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    "Edit"
                }
                DeleteButton {
                    confirm_text: "Delete this project?",
                    on_confirm: move |_| on_delete.call(delete_id.clone()),
                }
            }
        }
    }
}
