//! Todo Commands: add, edit, toggle, delete, archive, lock
//!
//! Every command checks its rule before touching the store. A rule
//! violation returns `Outcome::Ignored` and makes no store call; a store
//! failure returns `Err` and leaves nothing changed locally.

use chrono::{DateTime, Utc};

use crate::board::EditBuffer;
use crate::domain::{
    can_archive, can_modify, can_toggle_completed, can_toggle_lock, IgnoreReason, NewTodo, Outcome, TodoId, TodoItem,
    TodoPatch, TodoQuery, UserIdentity,
};
use crate::error::TodoResult;
use crate::repository::DocumentStore;

/// What a successful delete found out about the author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub author_email: String,
    /// No remaining item references the author
    pub author_orphaned: bool,
    /// The follow-up read failed, so `author_orphaned` is unknown
    pub author_check_failed: bool,
}

/// Create a new item authored by `actor`
pub async fn add_todo<S>(
    store: &S,
    actor: &UserIdentity,
    text: &str,
    now: DateTime<Utc>,
) -> TodoResult<Outcome<TodoId>>
where
    S: DocumentStore + ?Sized,
{
    let text = text.trim();
    if text.is_empty() {
        return Ok(Outcome::Ignored(IgnoreReason::EmptyText));
    }
    if !actor.can_author() {
        return Ok(Outcome::Ignored(IgnoreReason::SignedOut));
    }

    let id = store.create(NewTodo::new(text, actor, now)).await?;
    tracing::info!(%id, author = %actor.email, "todo added");
    Ok(Outcome::Applied(id))
}

/// Write the edit buffer back, re-checking the lock against a fresh copy
pub async fn commit_edit<S>(store: &S, actor: &UserIdentity, edit: &EditBuffer) -> TodoResult<Outcome>
where
    S: DocumentStore + ?Sized,
{
    let text = edit.text.trim();
    if text.is_empty() {
        return Ok(Outcome::Ignored(IgnoreReason::EmptyText));
    }

    let Some(current) = store.get(&edit.id).await? else {
        return Ok(Outcome::Ignored(IgnoreReason::Missing));
    };
    if let Err(reason) = can_modify(&current, &actor.email) {
        tracing::debug!(id = %edit.id, %reason, "edit rejected");
        return Ok(Outcome::Ignored(reason));
    }
    if current.text == text {
        return Ok(Outcome::Applied(()));
    }

    store.update(&edit.id, TodoPatch::text(text)).await?;
    tracing::info!(id = %edit.id, "todo edited");
    Ok(Outcome::Applied(()))
}

/// Flip `completed`; archived items must be unarchived first
pub async fn toggle_completed<S>(store: &S, actor: &UserIdentity, item: &TodoItem) -> TodoResult<Outcome>
where
    S: DocumentStore + ?Sized,
{
    if let Err(reason) = can_toggle_completed(item, &actor.email) {
        return Ok(Outcome::Ignored(reason));
    }
    store.update(&item.id, TodoPatch::completed(!item.completed)).await?;
    tracing::info!(id = %item.id, completed = !item.completed, "todo toggled");
    Ok(Outcome::Applied(()))
}

/// Remove the item, then check whether its author still has items
pub async fn delete_todo<S>(
    store: &S,
    actor: &UserIdentity,
    item: &TodoItem,
) -> TodoResult<Outcome<DeleteReport>>
where
    S: DocumentStore + ?Sized,
{
    if let Err(reason) = can_modify(item, &actor.email) {
        return Ok(Outcome::Ignored(reason));
    }
    store.delete(&item.id).await?;
    tracing::info!(id = %item.id, "todo deleted");

    // best effort: the item is already gone
    let (author_orphaned, author_check_failed) =
        match store.query(&TodoQuery::by_author(item.author_email.clone())).await {
            Ok(remaining) => (remaining.is_empty(), false),
            Err(err) => {
                tracing::warn!(id = %item.id, author = %item.author_email, error = %err, "author check after delete failed");
                (false, true)
            }
        };
    Ok(Outcome::Applied(DeleteReport {
        author_email: item.author_email.clone(),
        author_orphaned,
        author_check_failed,
    }))
}

/// Flip `archived`; only completed items qualify and the lock is not consulted
pub async fn toggle_archived<S>(store: &S, item: &TodoItem) -> TodoResult<Outcome>
where
    S: DocumentStore + ?Sized,
{
    if let Err(reason) = can_archive(item) {
        return Ok(Outcome::Ignored(reason));
    }
    store.update(&item.id, TodoPatch::archived(!item.archived)).await?;
    tracing::info!(id = %item.id, archived = !item.archived, "todo archive toggled");
    Ok(Outcome::Applied(()))
}

/// Flip `locked`; author only
pub async fn toggle_locked<S>(store: &S, actor: &UserIdentity, item: &TodoItem) -> TodoResult<Outcome>
where
    S: DocumentStore + ?Sized,
{
    if let Err(reason) = can_toggle_lock(item, &actor.email) {
        return Ok(Outcome::Ignored(reason));
    }
    store.update(&item.id, TodoPatch::locked(!item.locked)).await?;
    tracing::info!(id = %item.id, locked = !item.locked, "todo lock toggled");
    Ok(Outcome::Applied(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterState, TodoFilter};
    use crate::error::TodoError;
    use crate::repository::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ana() -> UserIdentity {
        UserIdentity::new("a", "ana@x.io").with_display_name("Ana")
    }

    fn bo() -> UserIdentity {
        UserIdentity::new("b", "bo@x.io").with_display_name("Bo")
    }

    async fn seeded(store: &MemoryStore, actor: &UserIdentity, text: &str) -> TodoItem {
        let id = add_todo(store, actor, text, Utc::now()).await.unwrap().applied().unwrap();
        store.get(&id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_add_rejects_blank_text() {
        let store = MemoryStore::new();
        for text in ["", "   ", "\t\n"] {
            let outcome = add_todo(&store, &ana(), text, Utc::now()).await.unwrap();
            assert_eq!(outcome, Outcome::Ignored(IgnoreReason::EmptyText));
        }
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_add_requires_author_email() {
        let store = MemoryStore::new();
        let outcome = add_todo(&store, &UserIdentity::new("x", ""), "task", Utc::now()).await.unwrap();
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::SignedOut));
    }

    #[tokio::test]
    async fn test_buy_milk_round_trip() {
        let store = MemoryStore::new();
        let filters = FilterState::default();
        let live = Rc::new(RefCell::new(Vec::new()));
        let sink = live.clone();
        let _sub = store
            .subscribe(&filters.query(), Box::new(move |snap| *sink.borrow_mut() = snap.unwrap()))
            .unwrap();

        add_todo(&store, &ana(), "Buy milk", Utc::now()).await.unwrap();

        let items = live.borrow();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Buy milk");
        assert!(!items[0].completed);
        assert!(!items[0].archived);
        assert_eq!(items[0].author_email, "ana@x.io");
        assert_eq!(items[0].author_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn test_locked_item_blocks_foreign_mutations() {
        let store = MemoryStore::new();
        let mut item = seeded(&store, &ana(), "Task 1").await;
        toggle_locked(&store, &ana(), &item).await.unwrap();
        item = store.get(&item.id).await.unwrap().unwrap();
        assert!(item.locked);
        let before = store.mutation_count();

        assert_eq!(
            toggle_completed(&store, &bo(), &item).await.unwrap(),
            Outcome::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(
            delete_todo(&store, &bo(), &item).await.unwrap(),
            Outcome::Ignored(IgnoreReason::Locked)
        );
        let edit = EditBuffer::new(&item).with_text("hijacked");
        assert_eq!(
            commit_edit(&store, &bo(), &edit).await.unwrap(),
            Outcome::Ignored(IgnoreReason::Locked)
        );

        assert_eq!(store.mutation_count(), before);
        assert_eq!(store.get(&item.id).await.unwrap().unwrap().text, "Task 1");
    }

    #[tokio::test]
    async fn test_author_may_modify_own_locked_item() {
        let store = MemoryStore::new();
        let mut item = seeded(&store, &ana(), "Mine").await;
        toggle_locked(&store, &ana(), &item).await.unwrap();
        item = store.get(&item.id).await.unwrap().unwrap();

        assert!(toggle_completed(&store, &ana(), &item).await.unwrap().is_applied());
        assert!(store.get(&item.id).await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_lock_is_author_only() {
        let store = MemoryStore::new();
        let item = seeded(&store, &ana(), "Task").await;
        assert_eq!(
            toggle_locked(&store, &bo(), &item).await.unwrap(),
            Outcome::Ignored(IgnoreReason::NotAuthor)
        );
        assert!(!store.get(&item.id).await.unwrap().unwrap().locked);
    }

    #[tokio::test]
    async fn test_archive_requires_completed_but_not_author() {
        let store = MemoryStore::new();
        let mut item = seeded(&store, &ana(), "Task").await;

        assert_eq!(
            toggle_archived(&store, &item).await.unwrap(),
            Outcome::Ignored(IgnoreReason::NotCompleted)
        );

        toggle_completed(&store, &ana(), &item).await.unwrap();
        toggle_locked(&store, &ana(), &item).await.unwrap();
        item = store.get(&item.id).await.unwrap().unwrap();
        assert!(item.locked && item.completed);

        // archived by someone else, lock notwithstanding
        assert!(toggle_archived(&store, &item).await.unwrap().is_applied());
        assert!(store.get(&item.id).await.unwrap().unwrap().archived);
    }

    #[tokio::test]
    async fn test_completed_filter_never_yields_archived() {
        let store = MemoryStore::new();
        let done = seeded(&store, &ana(), "done").await;
        let shelved = seeded(&store, &ana(), "shelved").await;
        seeded(&store, &ana(), "open").await;

        toggle_completed(&store, &ana(), &done).await.unwrap();
        toggle_completed(&store, &ana(), &shelved).await.unwrap();
        let shelved = store.get(&shelved.id).await.unwrap().unwrap();
        toggle_archived(&store, &shelved).await.unwrap();

        let mut filters = FilterState::default();
        filters.select_filter(TodoFilter::Completed);
        let items = store.query(&filters.query()).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "done");
        assert!(items.iter().all(|i| !i.archived));

        filters.select_filter(TodoFilter::Archived);
        let archived = store.query(&filters.query()).await.unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].text, "shelved");
    }

    #[tokio::test]
    async fn test_edit_scenario_lock_blocks_second_user() {
        let store = MemoryStore::new();
        let item = seeded(&store, &ana(), "Task 1").await;

        let edit = EditBuffer::new(&item).with_text("Task 1 (by Bo)");
        assert!(commit_edit(&store, &bo(), &edit).await.unwrap().is_applied());
        let item = store.get(&item.id).await.unwrap().unwrap();
        assert_eq!(item.text, "Task 1 (by Bo)");

        toggle_locked(&store, &ana(), &item).await.unwrap();
        let before = store.mutation_count();

        // Bo's edit buffer was opened before the lock; the fresh read catches it
        let stale = EditBuffer::new(&item).with_text("Bo again");
        assert_eq!(
            commit_edit(&store, &bo(), &stale).await.unwrap(),
            Outcome::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(store.mutation_count(), before);
        assert_eq!(store.get(&item.id).await.unwrap().unwrap().text, "Task 1 (by Bo)");
    }

    #[tokio::test]
    async fn test_commit_missing_item() {
        let store = MemoryStore::new();
        let item = seeded(&store, &ana(), "Task").await;
        store.delete(&item.id).await.unwrap();

        let edit = EditBuffer::new(&item).with_text("new");
        assert_eq!(
            commit_edit(&store, &ana(), &edit).await.unwrap(),
            Outcome::Ignored(IgnoreReason::Missing)
        );
    }

    #[tokio::test]
    async fn test_delete_reports_orphaned_author() {
        let store = MemoryStore::new();
        let first = seeded(&store, &bo(), "one").await;
        let second = seeded(&store, &bo(), "two").await;

        let report = delete_todo(&store, &ana(), &first).await.unwrap().applied().unwrap();
        assert!(!report.author_orphaned);

        let report = delete_todo(&store, &ana(), &second).await.unwrap().applied().unwrap();
        assert!(report.author_orphaned);
        assert_eq!(report.author_email, "bo@x.io");
    }

    #[tokio::test]
    async fn test_store_failure_is_error() {
        let store = MemoryStore::new();
        let item = seeded(&store, &ana(), "Task").await;
        store.fail_writes(Some("permission-denied"));

        let err = toggle_completed(&store, &ana(), &item).await.unwrap_err();
        assert_eq!(err, TodoError::Store("permission-denied".into()));
        assert!(!store.get(&item.id).await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_delete_survives_failed_author_check() {
        let store = MemoryStore::new();
        let item = seeded(&store, &bo(), "Bo's only").await;
        store.fail_queries(Some("index required"));

        let report = delete_todo(&store, &ana(), &item).await.unwrap().applied().unwrap();
        assert!(report.author_check_failed);
        assert!(!report.author_orphaned);
        assert!(store.get(&item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_archived_item_cannot_be_uncompleted() {
        let store = MemoryStore::new();
        let item = seeded(&store, &ana(), "Task").await;
        toggle_completed(&store, &ana(), &item).await.unwrap();
        let item = store.get(&item.id).await.unwrap().unwrap();
        toggle_archived(&store, &item).await.unwrap();
        let item = store.get(&item.id).await.unwrap().unwrap();
        let before = store.mutation_count();

        assert_eq!(
            toggle_completed(&store, &ana(), &item).await.unwrap(),
            Outcome::Ignored(IgnoreReason::Archived)
        );
        assert_eq!(store.mutation_count(), before);

        // still completed, so it can come back out of the archive
        assert!(toggle_archived(&store, &item).await.unwrap().is_applied());
        let item = store.get(&item.id).await.unwrap().unwrap();
        assert!(!item.archived && item.completed);
    }
}
