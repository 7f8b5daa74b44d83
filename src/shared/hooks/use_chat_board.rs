use chrono::Utc;
use dioxus::prelude::*;

use crate::domain::models::{Message, User};
use crate::domain::services::ChatBoard;
use crate::infrastructure::storage::ChatStore;

use super::use_app::use_app;

/// Chat threads for the chat page; every change is written back to storage.
#[derive(Clone)]
pub struct ChatBoardState {
    pub board: Signal<ChatBoard>,
    store: ChatStore,
}

impl PartialEq for ChatBoardState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl ChatBoardState {
    fn update<R>(&self, change: impl FnOnce(&mut ChatBoard) -> R) -> R {
        let mut board = self.board;
        let result = {
            let mut guard = board.write();
            change(&mut guard)
        };
        self.store.save(board.peek().threads());
        result
    }

    pub fn create_thread(&self) -> String {
        self.update(|board| board.create_thread(Utc::now(), None))
    }

    pub fn open(&self, id: &str) {
        let mut board = self.board;
        board.write().open(id);
    }

    pub fn close(&self, id: &str) {
        let mut board = self.board;
        board.write().close(id);
    }

    pub fn rename(&self, id: &str, title: &str) -> bool {
        self.update(|board| board.rename(id, title))
    }

    pub fn delete(&self, id: &str) {
        self.update(|board| board.delete(id));
    }

    pub fn send(&self, thread_id: &str, text: &str, sender: &User) -> Option<Message> {
        self.update(|board| board.send_message(thread_id, text, sender, Utc::now()))
    }
}

pub fn use_chat_board() -> ChatBoardState {
    let store = use_app().chat_store;
    let board = {
        let store = store.clone();
        use_signal(move || ChatBoard::from_threads(store.load()))
    };
    ChatBoardState { board, store }
}
