use dioxus::prelude::*;

use crate::app::components::{ChatWindow, EmptyState, PageHeader, ThreadsSidebar};
use crate::domain::models::ChatThread;
use crate::shared::hooks::{use_chat_board, use_current_user};

/// Local chat threads: a sidebar of threads and one window per open tab.
#[component]
pub fn ChatPage() -> Element {
    let state = use_chat_board();
    let me = use_current_user();
    let open: Vec<ChatThread> = state.board.read().open_threads().into_iter().cloned().collect();

    rsx! {
        div { class: "c-page",
            PageHeader { title: "Chat" }
            div { class: "c-chat",
                ThreadsSidebar { state: state.clone() }
                div { class: "c-chat__windows",
                    {match me {
                        Some(me) => rsx! {
                            if open.is_empty() {
                                EmptyState { message: "Open a thread or start a new one" }
                            }
                            for thread in open {
                                ChatWindow {
                                    key: "{thread.id}",
                                    state: state.clone(),
                                    users: vec![me.clone()],
                                    me: me.clone(),
                                    thread,
                                }
                            }
                        },
                        None => rsx! {
                            EmptyState { message: "Sign in to send messages" }
                        },
                    }}
                }
            }
        }
    }
}
