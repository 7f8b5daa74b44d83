use std::rc::Rc;

use crate::domain::models::ChatThread;
use crate::shared::logging;

use super::KeyValueStore;

pub const CHAT_THREADS_KEY: &str = "milestack_chat_threads";

/// Chat threads serialized as one JSON array under [`CHAT_THREADS_KEY`].
///
/// Failures are logged and never surfaced: unreadable data loads as an
/// empty list and a failed save leaves the in-memory threads untouched.
#[derive(Clone)]
pub struct ChatStore {
    store: Rc<dyn KeyValueStore>,
}

impl ChatStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Vec<ChatThread> {
        let raw = match self.store.get(CHAT_THREADS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                logging::log_chat_storage_error("load", &e.to_string());
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(threads) => threads,
            Err(e) => {
                logging::log_chat_storage_error("parse", &e.to_string());
                Vec::new()
            }
        }
    }

    pub fn save(&self, threads: &[ChatThread]) {
        let result = serde_json::to_string(threads)
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(CHAT_THREADS_KEY, &json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            logging::log_chat_storage_error("save", &e);
        }
    }
}
