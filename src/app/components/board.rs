use dioxus::prelude::*;

use crate::shared::state::DragPayload;

/// One kanban column; fires `on_drop` with whatever is being dragged.
#[component]
pub fn BoardColumn(
    title: String,
    count: usize,
    dragging: Signal<DragPayload>,
    on_drop: EventHandler<DragPayload>,
    children: Element,
) -> Element {
    let mut is_over = use_signal(|| false);
    let over_class = if is_over() { "c-board__column--over" } else { "" };

    rsx! {
        section {
            class: "c-board__column {over_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                is_over.set(true);
            },
            ondragleave: move |_| is_over.set(false),
            ondrop: move |evt| {
                evt.prevent_default();
                is_over.set(false);
                let payload = dragging.peek().clone();
                end_drag(dragging);
                on_drop.call(payload);
            },
            header { class: "c-board__column-header",
                h2 { "{title}" }
                span { class: "c-board__count", "{count}" }
            }
            {children}
        }
    }
}

/// Marks `id` as the drag payload while its card is held.
pub fn start_drag(mut dragging: Signal<DragPayload>, id: &str) {
    dragging.set(DragPayload::new(id));
}

pub fn end_drag(mut dragging: Signal<DragPayload>) {
    dragging.set(DragPayload::empty());
}
