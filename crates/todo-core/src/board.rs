//! List View State
//!
//! Transient, process-local state of the todo list view: the draft being
//! typed, the item being edited and the filter selection. The `finish_*`
//! methods fold a command result back into the state.

use crate::commands::DeleteReport;
use crate::domain::{FilterState, IgnoreReason, Outcome, TodoFilter, TodoId, TodoItem, UserSelection};
use crate::error::TodoResult;

/// An in-progress edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub id: TodoId,
    pub text: String,
}

impl EditBuffer {
    /// Start editing with the item's current text
    pub fn new(item: &TodoItem) -> Self {
        Self {
            id: item.id.clone(),
            text: item.text.clone(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub draft: String,
    pub editing: Option<EditBuffer>,
    pub filters: FilterState,
}

impl BoardState {
    pub fn begin_edit(&mut self, item: &TodoItem) {
        self.editing = Some(EditBuffer::new(item));
    }

    pub fn set_edit_text(&mut self, text: String) {
        if let Some(edit) = self.editing.as_mut() {
            edit.text = text;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn is_editing(&self, id: &TodoId) -> bool {
        self.editing.as_ref().is_some_and(|edit| &edit.id == id)
    }

    pub fn select_filter(&mut self, filter: TodoFilter) {
        self.filters.select_filter(filter);
    }

    pub fn select_user(&mut self, selection: UserSelection) {
        self.filters.select_user(selection);
    }

    /// Clear the draft once the item exists, unless it was edited while
    /// `submitted` was in flight
    pub fn finish_add<T>(&mut self, submitted: &str, result: &TodoResult<Outcome<T>>) {
        if matches!(result, Ok(Outcome::Applied(_))) && self.draft == submitted {
            self.draft.clear();
        }
    }

    /// Leave edit mode unless the store failed or the text was blank
    pub fn finish_commit(&mut self, id: &TodoId, result: &TodoResult<Outcome>) {
        if !self.is_editing(id) {
            return;
        }
        match result {
            Ok(Outcome::Ignored(IgnoreReason::EmptyText)) | Err(_) => {}
            Ok(_) => self.editing = None,
        }
    }

    /// Drop a stale edit buffer and reset the author selection if needed
    pub fn finish_delete(&mut self, id: &TodoId, result: &TodoResult<Outcome<DeleteReport>>) {
        if let Ok(Outcome::Applied(report)) = result {
            if self.is_editing(id) {
                self.editing = None;
            }
            // unknown counts as orphaned
            let orphaned = report.author_orphaned || report.author_check_failed;
            if orphaned && self.filters.author_orphaned() {
                tracing::debug!(author = %report.author_email, "author has no items left, showing all users");
            }
        }
    }
}
