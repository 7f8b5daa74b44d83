//! Transient toasts shown after mutations succeed or fail.

use uuid::Uuid;

use crate::shared::errors::ApiError;

/// Oldest toasts are dropped beyond this many
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// How long a toast stays on screen before it dismisses itself
pub const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

impl ToastVariant {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastVariant::Default => "c-toast",
            ToastVariant::Destructive => "c-toast c-toast--destructive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, title: impl Into<String>, description: Option<String>, variant: ToastVariant) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(Toast {
            id,
            title: title.into(),
            description,
            variant,
        });
        if self.toasts.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.toasts.len() - MAX_VISIBLE_TOASTS;
            self.toasts.drain(..overflow);
        }
        id
    }

    pub fn success(&mut self, title: impl Into<String>, description: impl Into<String>) -> Uuid {
        self.push(title, Some(description.into()), ToastVariant::Default)
    }

    /// Destructive toast carrying the server's message
    pub fn error(&mut self, title: impl Into<String>, err: &ApiError) -> Uuid {
        self.push(title, Some(err.to_string()), ToastVariant::Destructive)
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
