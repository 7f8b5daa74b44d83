//! Local chat threads and the tabs open on them.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::models::{ChatThread, Message, User};

pub const THREAD_ID_PREFIX: &str = "thread-";
pub const MESSAGE_ID_PREFIX: &str = "msg-";

/// All threads (newest first) plus the ids of the ones open as tabs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatBoard {
    threads: Vec<ChatThread>,
    open: Vec<String>,
}

impl ChatBoard {
    pub fn from_threads(threads: Vec<ChatThread>) -> Self {
        Self {
            threads,
            open: Vec::new(),
        }
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    pub fn thread(&self, id: &str) -> Option<&ChatThread> {
        self.threads.iter().find(|t| t.id == id)
    }

    /// Open tabs in the order they were opened
    pub fn open_threads(&self) -> Vec<&ChatThread> {
        self.open.iter().filter_map(|id| self.thread(id)).collect()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.iter().any(|open| open == id)
    }

    /// Prepend a fresh thread titled `New Thread <n+1>` and open it.
    pub fn create_thread(&mut self, now: DateTime<Utc>, project_id: Option<String>) -> String {
        let id = self.unique_id(THREAD_ID_PREFIX, now.timestamp_millis(), |board, candidate| {
            board.thread(candidate).is_some()
        });

        let thread = ChatThread {
            id: id.clone(),
            title: format!("New Thread {}", self.threads.len() + 1),
            messages: Vec::new(),
            project_id,
        };
        self.threads.insert(0, thread);
        self.open.push(id.clone());
        id
    }

    /// Returns false when the thread is unknown or already open.
    pub fn open(&mut self, id: &str) -> bool {
        if self.thread(id).is_none() || self.is_open(id) {
            return false;
        }
        self.open.push(id.to_string());
        true
    }

    pub fn close(&mut self, id: &str) -> bool {
        let before = self.open.len();
        self.open.retain(|open| open != id);
        self.open.len() != before
    }

    /// Blank titles are refused.
    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.threads.iter_mut().find(|t| t.id == id) {
            Some(thread) => {
                thread.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> Option<ChatThread> {
        let index = self.threads.iter().position(|t| t.id == id)?;
        self.close(id);
        Some(self.threads.remove(index))
    }

    /// Append a message from `sender`. Whitespace-only text sends nothing.
    pub fn send_message(
        &mut self,
        thread_id: &str,
        text: &str,
        sender: &User,
        now: DateTime<Utc>,
    ) -> Option<Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let thread = self.threads.iter().position(|t| t.id == thread_id)?;
        let taken: Vec<String> = self.threads[thread].messages.iter().map(|m| m.id.clone()).collect();
        let id = self.unique_id(MESSAGE_ID_PREFIX, now.timestamp_millis(), |_, candidate| {
            taken.iter().any(|existing| existing == candidate)
        });

        let message = Message {
            id,
            text: text.to_string(),
            sender_id: sender.sender_id().to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.threads[thread].messages.push(message.clone());
        Some(message)
    }

    fn unique_id(&self, prefix: &str, millis: i64, taken: impl Fn(&Self, &str) -> bool) -> String {
        let mut millis = millis;
        loop {
            let candidate = format!("{}{}", prefix, millis);
            if !taken(self, &candidate) {
                return candidate;
            }
            millis += 1;
        }
    }
}

/// Name and initials for a message sender, matched by id or email.
pub fn resolve_sender(users: &[User], sender_id: &str) -> (String, String) {
    match users.iter().find(|u| u.id == sender_id || u.email == sender_id) {
        Some(user) => (user.name.clone(), user.display_initials()),
        None => {
            let initial = sender_id
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_else(|| "?".to_string());
            (sender_id.to_string(), initial)
        }
    }
}
