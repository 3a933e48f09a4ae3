//! Application Context
//!
//! Shared session state and backend handles provided via Leptos Context API.

use leptos::prelude::*;
use todo_core::{SessionController, UserIdentity};

use crate::commands::{FirebaseAuth, FirestoreTodos};

/// Held for the app's lifetime; emptied on unmount to release the listener
pub type SessionSlot = StoredValue<Option<SessionController<FirebaseAuth>>, LocalStorage>;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current identity; `None` while signed out
    pub user: ReadSignal<Option<UserIdentity>>,
    /// Becomes true after the provider's first notification
    pub auth_ready: ReadSignal<bool>,
    session: SessionSlot,
    todos: StoredValue<FirestoreTodos>,
}

impl AppContext {
    pub fn new(
        user: ReadSignal<Option<UserIdentity>>,
        auth_ready: ReadSignal<bool>,
        session: SessionSlot,
        todos: FirestoreTodos,
    ) -> Self {
        Self {
            user,
            auth_ready,
            session,
            todos: StoredValue::new(todos),
        }
    }

    /// Document store for todo items
    pub fn todos(&self) -> FirestoreTodos {
        self.todos.get_value()
    }

    /// Identity commands act as; read without tracking
    pub fn actor(&self) -> Option<UserIdentity> {
        self.session
            .try_with_value(|held| held.as_ref().and_then(SessionController::current))
            .flatten()
    }

    /// Controller of the running session, `None` once the app unmounted
    pub fn session(&self) -> SessionSlot {
        self.session
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
