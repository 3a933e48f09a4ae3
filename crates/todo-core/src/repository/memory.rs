//! In-Memory Backend
//!
//! Single-threaded stand-in for the hosted store and identity provider.
//! Live queries are re-evaluated and pushed on every mutation, like the
//! hosted store does. Used by tests and offline demos.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use async_trait::async_trait;

use super::subscription::Subscription;
use super::traits::{DocumentStore, IdentityCallback, IdentityProvider, SnapshotCallback};
use crate::domain::{NewTodo, TodoId, TodoItem, TodoPatch, TodoQuery, UserIdentity};
use crate::error::{TodoError, TodoResult};

struct LiveQuery {
    id: u64,
    query: TodoQuery,
    on_snapshot: Rc<SnapshotCallback>,
}

#[derive(Default)]
struct StoreInner {
    docs: BTreeMap<TodoId, TodoItem>,
    next_doc: u64,
    next_sub: u64,
    live: Vec<LiveQuery>,
    mutations: usize,
    fail_writes: Option<String>,
    fail_queries: Option<String>,
}

/// In-memory document store
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create/update/delete calls received (including failed ones)
    pub fn mutation_count(&self) -> usize {
        self.inner.borrow().mutations
    }

    /// Number of live queries currently registered
    pub fn live_query_count(&self) -> usize {
        self.inner.borrow().live.len()
    }

    /// Make every write fail with `reason` until cleared with `None`
    pub fn fail_writes(&self, reason: Option<&str>) {
        self.inner.borrow_mut().fail_writes = reason.map(str::to_string);
    }

    /// Make every one-shot query fail with `reason` until cleared with `None`.
    /// Live queries and `get` keep working.
    pub fn fail_queries(&self, reason: Option<&str>) {
        self.inner.borrow_mut().fail_queries = reason.map(str::to_string);
    }

    /// Direct read of every stored item, in creation order
    pub fn snapshot(&self) -> Vec<TodoItem> {
        TodoQuery::new().evaluate(self.inner.borrow().docs.values())
    }

    fn begin_write(&self) -> TodoResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.mutations += 1;
        match &inner.fail_writes {
            Some(reason) => Err(TodoError::Store(reason.clone())),
            None => Ok(()),
        }
    }

    /// Push fresh results to every live query. Callbacks run with no borrow held.
    fn notify(&self) {
        let pending: Vec<(Rc<SnapshotCallback>, Vec<TodoItem>)> = {
            let inner = self.inner.borrow();
            inner
                .live
                .iter()
                .map(|live| (live.on_snapshot.clone(), live.query.evaluate(inner.docs.values())))
                .collect()
        };
        for (on_snapshot, items) in pending {
            on_snapshot(Ok(items));
        }
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    fn subscribe(&self, query: &TodoQuery, on_snapshot: SnapshotCallback) -> TodoResult<Subscription> {
        let on_snapshot = Rc::new(on_snapshot);
        let (id, initial) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_sub += 1;
            let id = inner.next_sub;
            inner.live.push(LiveQuery {
                id,
                query: query.clone(),
                on_snapshot: on_snapshot.clone(),
            });
            (id, query.evaluate(inner.docs.values()))
        };
        on_snapshot(Ok(initial));

        let weak: Weak<RefCell<StoreInner>> = Rc::downgrade(&self.inner);
        Ok(Subscription::new(format!("memory:{id}"), move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().live.retain(|live| live.id != id);
            }
        }))
    }

    async fn query(&self, query: &TodoQuery) -> TodoResult<Vec<TodoItem>> {
        let inner = self.inner.borrow();
        if let Some(reason) = &inner.fail_queries {
            return Err(TodoError::Store(reason.clone()));
        }
        Ok(query.evaluate(inner.docs.values()))
    }

    async fn create(&self, todo: NewTodo) -> TodoResult<TodoId> {
        self.begin_write()?;
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_doc += 1;
            let id = TodoId::new(format!("todo-{:04}", inner.next_doc));
            inner.docs.insert(id.clone(), todo.into_item(id.clone()));
            id
        };
        self.notify();
        Ok(id)
    }

    async fn update(&self, id: &TodoId, patch: TodoPatch) -> TodoResult<()> {
        self.begin_write()?;
        {
            let mut inner = self.inner.borrow_mut();
            let item = inner
                .docs
                .get_mut(id)
                .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
            patch.apply_to(item);
        }
        self.notify();
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> TodoResult<()> {
        self.begin_write()?;
        self.inner.borrow_mut().docs.remove(id);
        self.notify();
        Ok(())
    }

    async fn get(&self, id: &TodoId) -> TodoResult<Option<TodoItem>> {
        Ok(self.inner.borrow().docs.get(id).cloned())
    }
}

#[derive(Default)]
struct IdentityInner {
    current: Option<UserIdentity>,
    sign_in_results: VecDeque<TodoResult<UserIdentity>>,
    next_listener: u64,
    listeners: Vec<(u64, Rc<IdentityCallback>)>,
}

/// In-memory identity provider with scripted sign-in results
#[derive(Clone, Default)]
pub struct MemoryIdentity {
    inner: Rc<RefCell<IdentityInner>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next interactive sign-in
    pub fn push_sign_in_result(&self, result: TodoResult<UserIdentity>) {
        self.inner.borrow_mut().sign_in_results.push_back(result);
    }

    /// Simulate a provider-side session change
    pub fn set_current(&self, identity: Option<UserIdentity>) {
        self.inner.borrow_mut().current = identity.clone();
        let listeners: Vec<Rc<IdentityCallback>> =
            self.inner.borrow().listeners.iter().map(|(_, cb)| cb.clone()).collect();
        for on_change in listeners {
            on_change(identity.clone());
        }
    }

    pub fn current(&self) -> Option<UserIdentity> {
        self.inner.borrow().current.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MemoryIdentity {
    fn subscribe(&self, on_change: IdentityCallback) -> Subscription {
        let on_change = Rc::new(on_change);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_listener += 1;
            let id = inner.next_listener;
            inner.listeners.push((id, on_change.clone()));
            (id, inner.current.clone())
        };
        on_change(current);

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(format!("identity:{id}"), move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(listener, _)| *listener != id);
            }
        })
    }

    async fn sign_in_interactive(&self) -> TodoResult<UserIdentity> {
        let next = self.inner.borrow_mut().sign_in_results.pop_front();
        let identity = next.unwrap_or_else(|| Err(TodoError::Auth("no sign-in scripted".into())))?;
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> TodoResult<()> {
        self.set_current(None);
        Ok(())
    }
}
