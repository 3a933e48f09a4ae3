//! Todo View State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. One store per
//! mounted todo view; nothing here outlives the view.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{Author, BoardState, Outcome, TodoError, TodoId, TodoItem, TodoResult};

/// Render state of the todo list view
#[derive(Clone, Debug, Default, Store)]
pub struct TodoViewState {
    /// Latest snapshot of the active filter's live query
    pub items: Vec<TodoItem>,
    /// Authors among non-archived items, for the user selector
    pub roster: Vec<Author>,
    /// Draft, edit buffer and filter selection
    pub board: BoardState,
    /// Last failure shown to the user until dismissed
    pub status: Option<String>,
}

/// Type alias for the store
pub type TodoStore = Store<TodoViewState>;

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a failure until the user dismisses it
pub fn store_set_status(store: &TodoStore, message: String) {
    // late results can arrive after the view is gone
    if let Some(mut status) = store.status().try_write() {
        *status = Some(message);
    }
}

pub fn store_clear_status(store: &TodoStore) {
    *store.status().write() = None;
}

/// Log the result of a todo command; store failures also reach the status line
pub fn store_report<T>(store: &TodoStore, action: &str, id: Option<&TodoId>, result: &TodoResult<Outcome<T>>) {
    match result {
        Ok(Outcome::Applied(_)) => {}
        Ok(Outcome::Ignored(reason)) => {
            tracing::debug!(action, id = ?id.map(TodoId::as_str), %reason, "command ignored");
        }
        Err(err) => store_report_error(store, action, id, err),
    }
}

pub fn store_report_error(store: &TodoStore, action: &str, id: Option<&TodoId>, err: &TodoError) {
    tracing::warn!(action, id = ?id.map(TodoId::as_str), error = %err, "command failed");
    store_set_status(store, format!("Could not {action}: {err}"));
}

/// Fold a command result into the board state if the view is still mounted
pub fn store_update_board(store: &TodoStore, f: impl FnOnce(&mut BoardState)) {
    if let Some(mut board) = store.board().try_write() {
        f(&mut board);
    }
}
