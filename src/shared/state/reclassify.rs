//! Drag-and-drop reclassification across board columns.

use std::future::Future;

use crate::domain::models::Classified;
use crate::shared::errors::ApiError;
use crate::shared::logging::{self, LogOperation};

use super::optimistic::{position_of, reconcile, CollectionCell};

/// Identifier carried by a drag, read back on drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPayload(Option<String>);

impl DragPayload {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            Self(None)
        } else {
            Self(Some(trimmed.to_string()))
        }
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome<T> {
    /// Empty payload or an id the board does not hold
    Ignored,
    /// Dropped on the column it already sits in
    Unchanged,
    Moved(T),
    /// The server refused; the status was put back
    Reverted(ApiError),
}

/// Move one entity to `target` immediately, persist, and revert its status on failure.
///
/// Only the dropped entity's status is rolled back, and only if nothing moved
/// it again while the call was in flight.
pub async fn reclassify<T, C, F, Fut>(
    cell: &mut C,
    payload: &DragPayload,
    target: T::Status,
    remote: F,
) -> DropOutcome<T>
where
    T: Classified,
    C: CollectionCell<T>,
    F: FnOnce(String, T::Status) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let Some(id) = payload.id() else {
        logging::log_drop_ignored("empty payload");
        return DropOutcome::Ignored;
    };

    let mut items = cell.snapshot();
    let Some(index) = position_of(&items, id) else {
        logging::log_missing_entity(LogOperation::Reclassify, id);
        return DropOutcome::Ignored;
    };

    let previous = items[index].status();
    if previous == target {
        logging::log_drop_ignored("same column");
        return DropOutcome::Unchanged;
    }

    items[index].set_status(target);
    cell.replace(items);

    match remote(id.to_string(), target).await {
        Ok(server) => {
            reconcile(cell, id, server.clone());
            logging::log_reconciled(LogOperation::Reclassify, id);
            DropOutcome::Moved(server)
        }
        Err(err) => {
            revert_status(cell, id, target, previous);
            logging::log_rollback(LogOperation::Reclassify, id, &err.to_string());
            DropOutcome::Reverted(err)
        }
    }
}

fn revert_status<T, C>(cell: &mut C, id: &str, expected: T::Status, previous: T::Status)
where
    T: Classified,
    C: CollectionCell<T>,
{
    let mut items = cell.snapshot();
    if let Some(index) = position_of(&items, id) {
        if items[index].status() == expected {
            items[index].set_status(previous);
            cell.replace(items);
        }
    }
}

/// Group entities into the given columns, preserving collection order within each.
pub fn columns<T, K>(items: &[T], keys: &[K], key_of: impl Fn(&T) -> K) -> Vec<(K, Vec<T>)>
where
    T: Clone,
    K: Copy + PartialEq,
{
    keys.iter()
        .map(|key| {
            let members = items.iter().filter(|item| key_of(item) == *key).cloned().collect();
            (*key, members)
        })
        .collect()
}
