// Client-side collection state: optimistic mutation, drag-and-drop
// reclassification, project-scoped loading and toasts.
// Framework-free so it can be exercised from plain async tests.

pub mod notifications;
pub mod optimistic;
pub mod reclassify;
pub mod synchronizer;

pub use notifications::{Toast, ToastQueue, ToastVariant};
pub use optimistic::{confirmed_create, optimistic_delete, optimistic_update, CollectionCell};
pub use reclassify::{columns, reclassify, DragPayload, DropOutcome};
pub use synchronizer::{load_in_project, CollectionSynchronizer, ScopeState, Scoped};
