//! Optimistic mutations over an id-unique, ordered collection.
//!
//! Updates and deletes are applied locally before the remote call and
//! rolled back to the pre-mutation snapshot when the call fails. Creation
//! is confirmed: nothing is shown until the server returns the entity.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::domain::models::{Entity, Patch};
use crate::shared::errors::ApiError;
use crate::shared::logging::{self, LogOperation};

/// A place a collection lives: a UI signal, a shared cell, a plain vector.
pub trait CollectionCell<T> {
    fn snapshot(&self) -> Vec<T>;

    fn replace(&mut self, items: Vec<T>);
}

impl<T: Clone> CollectionCell<T> for Vec<T> {
    fn snapshot(&self) -> Vec<T> {
        self.clone()
    }

    fn replace(&mut self, items: Vec<T>) {
        *self = items;
    }
}

impl<T: Clone> CollectionCell<T> for Rc<RefCell<Vec<T>>> {
    fn snapshot(&self) -> Vec<T> {
        self.borrow().clone()
    }

    fn replace(&mut self, items: Vec<T>) {
        *self.borrow_mut() = items;
    }
}

pub fn position_of<T: Entity>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Swap the entity with `id` for `replacement`, leaving every other entry alone.
pub fn replace_by_id<T: Entity>(items: &mut [T], id: &str, replacement: T) -> bool {
    match position_of(items, id) {
        Some(index) => {
            items[index] = replacement;
            true
        }
        None => false,
    }
}

/// Put the server's version of an entity into whatever the collection holds now.
pub fn reconcile<T, C>(cell: &mut C, id: &str, server: T)
where
    T: Entity,
    C: CollectionCell<T>,
{
    let mut current = cell.snapshot();
    if position_of(&current, id).is_some_and(|index| current[index] == server) {
        return;
    }
    if replace_by_id(&mut current, id, server) {
        cell.replace(current);
    }
}

/// Patch locally, call the remote, then reconcile or roll back.
///
/// On success the entity becomes exactly what the server returned. On
/// failure the collection is restored to the snapshot taken before the
/// patch. An id absent from the collection only forwards the remote result.
pub async fn optimistic_update<T, P, C, Fut>(
    cell: &mut C,
    id: &str,
    patch: &P,
    remote: Fut,
) -> Result<T, ApiError>
where
    T: Entity,
    P: Patch<T>,
    C: CollectionCell<T>,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let old = cell.snapshot();

    let Some(index) = position_of(&old, id) else {
        logging::log_missing_entity(LogOperation::OptimisticUpdate, id);
        return remote.await;
    };

    let mut patched = old.clone();
    patch.apply_to(&mut patched[index]);
    cell.replace(patched);

    match remote.await {
        Ok(server) => {
            reconcile(cell, id, server.clone());
            logging::log_reconciled(LogOperation::OptimisticUpdate, id);
            Ok(server)
        }
        Err(err) => {
            cell.replace(old);
            logging::log_rollback(LogOperation::OptimisticUpdate, id, &err.to_string());
            Err(err)
        }
    }
}

/// Remove locally, call the remote, put the entity back on failure.
///
/// The restore goes into the collection as it is when the call fails, right
/// after the entity's former predecessor (or at its old index when that one
/// is gone too), so anything confirmed meanwhile survives. Returns the
/// removed entity, or `None` when the id was not in the collection.
pub async fn optimistic_delete<T, C, Fut>(
    cell: &mut C,
    id: &str,
    remote: Fut,
) -> Result<Option<T>, ApiError>
where
    T: Entity,
    C: CollectionCell<T>,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let mut items = cell.snapshot();
    let removed = position_of(&items, id).map(|index| {
        let anchor = Anchor {
            index,
            after: index.checked_sub(1).map(|prev| items[prev].id().to_string()),
        };
        (anchor, items.remove(index))
    });

    match removed {
        Some(_) => cell.replace(items),
        None => logging::log_missing_entity(LogOperation::OptimisticDelete, id),
    }

    match remote.await {
        Ok(()) => Ok(removed.map(|(_, entity)| entity)),
        Err(err) => {
            if let Some((anchor, entity)) = removed {
                restore_at(cell, &anchor, entity);
            }
            logging::log_rollback(LogOperation::OptimisticDelete, id, &err.to_string());
            Err(err)
        }
    }
}

/// Where a removed entity sat: its index and the id just before it.
struct Anchor {
    index: usize,
    after: Option<String>,
}

fn restore_at<T, C>(cell: &mut C, anchor: &Anchor, entity: T)
where
    T: Entity,
    C: CollectionCell<T>,
{
    let mut current = cell.snapshot();
    if position_of(&current, entity.id()).is_some() {
        return;
    }
    let index = match &anchor.after {
        None => 0,
        Some(prev) => match position_of(&current, prev) {
            Some(found) => found + 1,
            None => anchor.index.min(current.len()),
        },
    };
    current.insert(index, entity);
    cell.replace(current);
}

/// Wait for the server, then prepend what it created.
pub async fn confirmed_create<T, C, Fut>(cell: &mut C, remote: Fut) -> Result<T, ApiError>
where
    T: Entity,
    C: CollectionCell<T>,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match remote.await {
        Ok(created) => {
            let mut items = cell.snapshot();
            items.retain(|item| item.id() != created.id());
            items.insert(0, created.clone());
            cell.replace(items);
            Ok(created)
        }
        Err(err) => {
            logging::log_create_error(&err.to_string());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Milestone, MilestonePatch, Task, TaskPatch, TaskPriority, TaskStatus};

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignee_id: None,
            project_id: "p1".into(),
        }
    }

    fn milestone(id: &str) -> Milestone {
        Milestone {
            id: id.into(),
            title: format!("Milestone {}", id),
            description: String::new(),
            due_date: "2024-06-01".into(),
            progress: 0,
            status: None,
            project_id: "p1".into(),
        }
    }

    fn rejected() -> ApiError {
        ApiError::Rejected {
            status: 500,
            message: "boom".into(),
        }
    }

    fn shared<T>(items: Vec<T>) -> Rc<RefCell<Vec<T>>> {
        Rc::new(RefCell::new(items))
    }

    #[tokio::test]
    async fn test_update_failure_restores_snapshot() {
        let before = vec![task("t1", "Docs"), task("t2", "Tests"), task("t3", "Deploy")];
        let mut cell = shared(before.clone());
        let observer = cell.clone();
        let patch = TaskPatch {
            title: Some("Docs v2".into()),
            priority: Some(TaskPriority::High),
            ..Default::default()
        };

        let result = optimistic_update(&mut cell, "t2", &patch, async {
            // The optimistic patch is visible while the call is in flight
            let during = observer.borrow().clone();
            assert_eq!(during[1].title, "Docs v2");
            assert_eq!(during[1].priority, TaskPriority::High);
            Err::<Task, _>(rejected())
        })
        .await;

        assert_eq!(result, Err(rejected()));
        assert_eq!(*cell.borrow(), before);
    }

    #[tokio::test]
    async fn test_update_success_stores_server_entity() {
        let mut cell = vec![task("t1", "Docs"), task("t2", "Tests"), task("t3", "Deploy")];
        let patch = TaskPatch {
            title: Some("Tests!".into()),
            ..Default::default()
        };
        let mut server = task("t2", "Tests (server)");
        server.description = Some("normalized by server".into());

        let saved = optimistic_update(&mut cell, "t2", &patch, async { Ok(server.clone()) })
            .await
            .unwrap();

        assert_eq!(saved, server);
        assert_eq!(cell[1], server);
        assert_eq!(cell[0], task("t1", "Docs"));
        assert_eq!(cell[2], task("t3", "Deploy"));
    }

    #[tokio::test]
    async fn test_reconcile_twice_is_a_no_op() {
        let mut cell = vec![task("t1", "Docs"), task("t2", "Tests")];
        let server = task("t1", "Docs (final)");

        reconcile(&mut cell, "t1", server.clone());
        let once = cell.clone();
        reconcile(&mut cell, "t1", server);

        assert_eq!(cell, once);
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_leaves_collection() {
        let before = vec![task("t1", "Docs")];
        let mut cell = before.clone();

        let result = optimistic_update(&mut cell, "missing", &TaskPatch::status(TaskStatus::Done), async {
            Err::<Task, _>(rejected())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(cell, before);
    }

    #[tokio::test]
    async fn test_delete_failure_restores_original_index() {
        let before = vec![milestone("m1"), milestone("m2"), milestone("m3")];
        let mut cell = shared(before.clone());
        let observer = cell.clone();

        let result = optimistic_delete(&mut cell, "m2", async {
            let ids: Vec<String> = observer.borrow().iter().map(|m| m.id.clone()).collect();
            assert_eq!(ids, vec!["m1", "m3"]);
            Err(rejected())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*cell.borrow(), before);
        assert_eq!(cell.borrow()[1].id, "m2");
    }

    #[tokio::test]
    async fn test_delete_rollback_keeps_entity_created_meanwhile() {
        let mut cell = shared(vec![milestone("m1"), milestone("m2"), milestone("m3")]);
        let mut creator = cell.clone();
        let (fail_delete, delete_outcome) = tokio::sync::oneshot::channel::<()>();

        let delete = optimistic_delete(&mut cell, "m2", async {
            let _ = delete_outcome.await;
            Err(rejected())
        });
        let create = async {
            let created = confirmed_create(&mut creator, async { Ok(milestone("m9")) }).await;
            let _ = fail_delete.send(());
            created
        };
        let (deleted, created) = futures::join!(delete, create);

        assert!(deleted.is_err());
        assert!(created.is_ok());
        let ids: Vec<String> = cell.borrow().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec!["m9", "m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn test_delete_rollback_skips_entity_already_back() {
        let mut cell = shared(vec![milestone("m1"), milestone("m2")]);
        let observer = cell.clone();

        let result = optimistic_delete(&mut cell, "m2", async {
            observer.borrow_mut().push(milestone("m2"));
            Err(rejected())
        })
        .await;

        assert!(result.is_err());
        let ids: Vec<String> = cell.borrow().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_delete_success_returns_removed() {
        let mut cell = vec![milestone("m1"), milestone("m2")];

        let removed = optimistic_delete(&mut cell, "m1", async { Ok(()) }).await.unwrap();

        assert_eq!(removed.map(|m| m.id), Some("m1".to_string()));
        assert_eq!(cell, vec![milestone("m2")]);
    }

    #[tokio::test]
    async fn test_create_prepends_only_on_success() {
        let mut cell = vec![task("t1", "Docs")];

        let failed = confirmed_create(&mut cell, async { Err::<Task, _>(rejected()) }).await;
        assert!(failed.is_err());
        assert_eq!(cell, vec![task("t1", "Docs")]);

        let created = confirmed_create(&mut cell, async { Ok(task("t9", "Fresh")) }).await.unwrap();
        assert_eq!(created.id, "t9");
        assert_eq!(cell, vec![task("t9", "Fresh"), task("t1", "Docs")]);
    }

    #[tokio::test]
    async fn test_milestone_update_reconciles_progress() {
        let mut cell = vec![milestone("m1"), milestone("m2")];
        let patch = MilestonePatch::for_project("p1").with_progress(250.0);
        let mut server = milestone("m2");
        server.progress = 100;
        server.status = Some("completed".into());

        optimistic_update(&mut cell, "m2", &patch, async { Ok(server.clone()) })
            .await
            .unwrap();

        assert_eq!(cell[1], server);
    }
}
