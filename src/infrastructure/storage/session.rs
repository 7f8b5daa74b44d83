use std::rc::Rc;

use crate::domain::models::{AuthResponse, Patch, ProfilePatch, User};
use crate::shared::errors::StorageError;
use crate::shared::logging;

use super::KeyValueStore;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Bearer token and signed-in user, kept in the key-value store.
#[derive(Clone)]
pub struct SessionStore {
    store: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Blank tokens count as no token.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// A stored user that no longer parses is treated as absent.
    pub fn user(&self) -> Option<User> {
        let raw = match self.store.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session user is not valid JSON");
                None
            }
        }
    }

    pub fn save(&self, auth: &AuthResponse) {
        if let Err(e) = self.store.set(TOKEN_KEY, &auth.token) {
            tracing::error!(error = %e, "Failed to store session token");
        }
        let stored = match &auth.user {
            Some(user) => self.write_user(user),
            // No user in the response: drop whatever the previous account left
            None => self.store.remove(USER_KEY),
        };
        if let Err(e) = stored {
            tracing::error!(error = %e, "Failed to store session user");
        }
        logging::log_session_event("signed_in");
    }

    /// Apply a profile edit to the stored user and persist it.
    pub fn update_user(&self, patch: &ProfilePatch) -> Result<User, StorageError> {
        let mut user = self.user().ok_or(StorageError::NoSession)?;
        patch.apply_to(&mut user);
        self.write_user(&user)?;
        logging::log_session_event("profile_updated");
        Ok(user)
    }

    fn write_user(&self, user: &User) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &json)
    }

    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!(error = %e, key = key, "Failed to clear session entry");
            }
        }
        logging::log_session_event("cleared");
    }
}
