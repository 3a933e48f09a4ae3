//! Repository Integration Tests
//!
//! Tests for the in-memory backend's live-query behavior.

#[cfg(test)]
mod tests {
    use crate::domain::{Condition, NewTodo, TodoItem, TodoPatch, TodoQuery, UserIdentity};
    use crate::repository::{DocumentStore, IdentityProvider, MemoryIdentity, MemoryStore};
    use crate::error::TodoError;
    use chrono::{DateTime, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn author() -> UserIdentity {
        UserIdentity::new("u1", "ana@x.io").with_display_name("Ana")
    }

    /// Subscribe and collect every snapshot
    fn watch(store: &MemoryStore, query: TodoQuery) -> (crate::repository::Subscription, Rc<RefCell<Vec<Vec<TodoItem>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = store
            .subscribe(&query, Box::new(move |snap| sink.borrow_mut().push(snap.unwrap())))
            .expect("subscribe");
        (sub, seen)
    }

    #[tokio::test]
    async fn test_subscribe_pushes_initial_and_changes() {
        let store = MemoryStore::new();
        let (_sub, seen) = watch(&store, TodoQuery::new().with(Condition::Archived(false)));

        assert_eq!(seen.borrow().len(), 1);
        assert!(seen.borrow()[0].is_empty());

        store.create(NewTodo::new("Buy milk", &author(), at(10))).await.unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1][0].text, "Buy milk");
    }

    #[tokio::test]
    async fn test_snapshots_are_ordered_by_creation() {
        let store = MemoryStore::new();
        store.create(NewTodo::new("second", &author(), at(20))).await.unwrap();
        store.create(NewTodo::new("first", &author(), at(10))).await.unwrap();

        let items = store.query(&TodoQuery::new()).await.unwrap();
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_dropped_subscription_stops_updates() {
        let store = MemoryStore::new();
        let (sub, seen) = watch(&store, TodoQuery::new());
        assert_eq!(store.live_query_count(), 1);

        drop(sub);
        assert_eq!(store.live_query_count(), 0);

        store.create(NewTodo::new("late", &author(), at(1))).await.unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_get() {
        let store = MemoryStore::new();
        let id = store.create(NewTodo::new("draft", &author(), at(1))).await.unwrap();

        store.update(&id, TodoPatch::completed(true)).await.unwrap();
        let found = store.get(&id).await.unwrap().expect("exists");
        assert!(found.completed);
        assert_eq!(found.text, "draft");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let missing = crate::domain::TodoId::new("nope");
        let err = store.update(&missing, TodoPatch::text("x")).await.unwrap_err();
        assert_eq!(err, TodoError::NotFound("nope".into()));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let store = MemoryStore::new();
        let (_sub, seen) = watch(&store, TodoQuery::new());
        store.fail_writes(Some("offline"));

        let err = store.create(NewTodo::new("x", &author(), at(1))).await.unwrap_err();
        assert!(matches!(err, TodoError::Store(_)));
        assert!(store.snapshot().is_empty());
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(store.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_from_live_query() {
        let store = MemoryStore::new();
        let id = store.create(NewTodo::new("gone", &author(), at(1))).await.unwrap();
        let (_sub, seen) = watch(&store, TodoQuery::new());

        store.delete(&id).await.unwrap();
        assert!(seen.borrow().last().unwrap().is_empty());
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_identity_subscription_and_sign_in() {
        let auth = MemoryIdentity::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = auth.subscribe(Box::new(move |user| sink.borrow_mut().push(user)));

        assert_eq!(seen.borrow().as_slice(), &[None]);

        auth.push_sign_in_result(Ok(author()));
        let user = auth.sign_in_interactive().await.unwrap();
        assert_eq!(user.email, "ana@x.io");
        assert_eq!(seen.borrow().last().unwrap().as_ref().unwrap().uid, "u1");

        auth.sign_out().await.unwrap();
        assert_eq!(seen.borrow().last().unwrap(), &None);

        drop(sub);
        assert_eq!(auth.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_failure_keeps_session() {
        let auth = MemoryIdentity::new();
        auth.push_sign_in_result(Err(TodoError::Auth("popup closed".into())));

        let err = auth.sign_in_interactive().await.unwrap_err();
        assert_eq!(err, TodoError::Auth("popup closed".into()));
        assert!(auth.current().is_none());
    }
}
