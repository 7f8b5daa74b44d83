use dioxus::prelude::*;

use crate::domain::models::{ChatThread, Message, User};
use crate::domain::services::resolve_sender;
use crate::shared::hooks::ChatBoardState;

/// Thread list with create, rename and delete.
#[component]
pub fn ThreadsSidebar(state: ChatBoardState) -> Element {
    let board = state.board;
    let mut editing = use_signal(|| None::<String>);
    let mut draft_title = use_signal(String::new);
    let threads: Vec<ChatThread> = board.read().threads().to_vec();

    let create = {
        let state = state.clone();
        move |_| {
            state.create_thread();
        }
    };

    rsx! {
        aside { class: "c-threads",
            header { class: "c-threads__header",
                h2 { "Threads" }
                button { class: "c-button c-button--primary", onclick: create, "New thread" }
            }
            if threads.is_empty() {
                p { class: "empty-state", "No threads yet" }
            }
            ul { class: "c-threads__list",
                for thread in threads {
                    {
                        let id = thread.id.clone();
                        let is_open = board.read().is_open(&id);
                        let is_editing = editing.read().as_deref() == Some(id.as_str());
                        let open_state = state.clone();
                        let rename_state = state.clone();
                        let delete_state = state.clone();
                        let open_id = id.clone();
                        let edit_id = id.clone();
                        let rename_id = id.clone();
                        let delete_id = id.clone();
                        let title = thread.title.clone();
                        rsx! {
                            li {
                                key: "{id}",
                                class: if is_open { "c-threads__item c-threads__item--active" } else { "c-threads__item" },
                                if is_editing {
                                    form {
                                        onsubmit: move |evt| {
                                            evt.prevent_default();
                                            rename_state.rename(&rename_id, &draft_title.read());
                                            editing.set(None);
                                        },
                                        input {
                                            class: "c-threads__rename",
                                            value: "{draft_title}",
                                            oninput: move |evt| draft_title.set(evt.value()),
                                            onblur: move |_| editing.set(None),
                                        }
                                    }
                                } else {
                                    button {
                                        class: "c-threads__title",
                                        onclick: move |_| open_state.open(&open_id),
                                        "{thread.title}"
                                    }
                                    span { class: "c-threads__count", "{thread.messages.len()}" }
                                    button {
                                        class: "c-threads__action",
                                        title: "Rename",
                                        onclick: move |_| {
                                            draft_title.set(title.clone());
                                            editing.set(Some(edit_id.clone()));
                                        },
                                        "✎"
                                    }
                                    button {
                                        class: "c-threads__action c-threads__action--danger",
                                        title: "Delete",
                                        onclick: move |_| delete_state.delete(&delete_id),
                                        "×"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One open thread: its messages and a send box.
#[component]
pub fn ChatWindow(state: ChatBoardState, thread: ChatThread, me: User, users: Vec<User>) -> Element {
    let mut draft = use_signal(String::new);
    let thread_id = thread.id.clone();

    let send = {
        let state = state.clone();
        let me = me.clone();
        let thread_id = thread_id.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let text = draft.read().clone();
            if state.send(&thread_id, &text, &me).is_some() {
                draft.set(String::new());
            }
        }
    };

    let close_state = state.clone();
    let close_id = thread_id.clone();

    rsx! {
        section { class: "c-chat-window",
            header { class: "c-chat-window__header",
                h3 { "{thread.title}" }
                button {
                    class: "c-chat-window__close",
                    title: "Close",
                    onclick: move |_| close_state.close(&close_id),
                    "×"
                }
            }
            div { class: "c-chat-window__messages",
                if thread.messages.is_empty() {
                    p { class: "empty-state", "No messages yet" }
                }
                for message in thread.messages.iter() {
                    MessageRow {
                        key: "{message.id}",
                        message: message.clone(),
                        mine: message.sender_id == me.sender_id(),
                        users: users.clone(),
                    }
                }
            }
            form { class: "c-chat-window__form", onsubmit: send,
                input {
                    class: "c-chat-window__input",
                    placeholder: "Write a message",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    class: "c-button c-button--primary",
                    r#type: "submit",
                    disabled: draft.read().trim().is_empty(),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: Message, mine: bool, users: Vec<User>) -> Element {
    let (name, initials) = resolve_sender(&users, &message.sender_id);
    let time = chrono::DateTime::parse_from_rfc3339(&message.timestamp)
        .map(|at| at.format("%H:%M").to_string())
        .unwrap_or_default();

    rsx! {
        div { class: if mine { "c-chat__message c-chat__message--mine" } else { "c-chat__message" },
            span { class: "c-avatar", "{initials}" }
            div { class: "c-chat__bubble",
                div { class: "c-chat__meta",
                    strong { "{name}" }
                    span { class: "c-chat__time", "{time}" }
                }
                p { "{message.text}" }
            }
        }
    }
}
