//! Backend Seams - Core Traits
//!
//! Abstract interfaces for the hosted backend.
//! Implementations: Firebase bindings in the browser, in-memory for tests.
//!
//! Futures are `?Send`: every implementation runs on a single-threaded
//! event loop and browser handles are not thread-safe.

use async_trait::async_trait;

use super::subscription::Subscription;
use crate::domain::{NewTodo, TodoId, TodoItem, TodoPatch, TodoQuery, UserIdentity};
use crate::error::TodoResult;

/// Receives every snapshot of a live query (the first one immediately)
pub type SnapshotCallback = Box<dyn Fn(TodoResult<Vec<TodoItem>>)>;

/// Receives every identity change; `None` means signed out
pub type IdentityCallback = Box<dyn Fn(Option<UserIdentity>)>;

/// Hosted document collection of todo items
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Start a live query. The ordering travels inside `query`.
    fn subscribe(&self, query: &TodoQuery, on_snapshot: SnapshotCallback) -> TodoResult<Subscription>;

    /// One-shot read of the items matching `query`
    async fn query(&self, query: &TodoQuery) -> TodoResult<Vec<TodoItem>>;

    /// Create a document, returning its store-assigned id
    async fn create(&self, todo: NewTodo) -> TodoResult<TodoId>;

    /// Write the set fields of `patch`
    async fn update(&self, id: &TodoId, patch: TodoPatch) -> TodoResult<()>;

    /// Remove a document
    async fn delete(&self, id: &TodoId) -> TodoResult<()>;

    /// Read a single document
    async fn get(&self, id: &TodoId) -> TodoResult<Option<TodoItem>>;
}

/// Third-party identity/session provider
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Watch session changes; the current state is delivered immediately
    fn subscribe(&self, on_change: IdentityCallback) -> Subscription;

    /// Interactive (popup) sign-in
    async fn sign_in_interactive(&self) -> TodoResult<UserIdentity>;

    /// End the current session
    async fn sign_out(&self) -> TodoResult<()>;
}
