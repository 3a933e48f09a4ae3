//! Filter Selection
//!
//! Transient filter state of the list view and the query each state maps to.

use serde::{Deserialize, Serialize};

use super::query::{Condition, TodoQuery};

/// Top-level filter choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    #[default]
    All,
    Completed,
    Pending,
    Archived,
    User,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 5] = [
        TodoFilter::All,
        TodoFilter::Completed,
        TodoFilter::Pending,
        TodoFilter::Archived,
        TodoFilter::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Completed => "completed",
            TodoFilter::Pending => "pending",
            TodoFilter::Archived => "archived",
            TodoFilter::User => "user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Completed => "Completed",
            TodoFilter::Pending => "Pending",
            TodoFilter::Archived => "Archived",
            TodoFilter::User => "By user",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "completed" => TodoFilter::Completed,
            "pending" => TodoFilter::Pending,
            "archived" => TodoFilter::Archived,
            "user" => TodoFilter::User,
            _ => TodoFilter::All,
        }
    }
}

/// Author narrowing, only meaningful under [`TodoFilter::User`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserSelection {
    #[default]
    All,
    Email(String),
}

impl UserSelection {
    /// Value used by the `<select>` element; empty string means "all"
    pub fn as_value(&self) -> &str {
        match self {
            UserSelection::All => "",
            UserSelection::Email(email) => email,
        }
    }

    pub fn from_value(value: &str) -> Self {
        if value.is_empty() {
            UserSelection::All
        } else {
            UserSelection::Email(value.to_string())
        }
    }
}

/// Combined filter state: `filter × selected_user`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    filter: TodoFilter,
    selected_user: UserSelection,
}

impl FilterState {
    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    pub fn selected_user(&self) -> &UserSelection {
        &self.selected_user
    }

    /// Switch filter; entering `User` always starts from "all users"
    pub fn select_filter(&mut self, filter: TodoFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.selected_user = UserSelection::All;
    }

    /// Narrow to one author; ignored outside the `User` filter
    pub fn select_user(&mut self, selection: UserSelection) {
        if self.filter == TodoFilter::User {
            self.selected_user = selection;
        }
    }

    /// Called once a deleted item's author has no items left: under the
    /// user filter, fall back to "all users". Returns whether it reset.
    pub fn author_orphaned(&mut self) -> bool {
        if self.filter == TodoFilter::User && self.selected_user != UserSelection::All {
            self.selected_user = UserSelection::All;
            return true;
        }
        false
    }

    /// Live query for the current state
    pub fn query(&self) -> TodoQuery {
        match (&self.filter, &self.selected_user) {
            (TodoFilter::All, _) => TodoQuery::new().with(Condition::Archived(false)),
            (TodoFilter::Completed, _) => TodoQuery::new()
                .with(Condition::Completed(true))
                .with(Condition::Archived(false)),
            (TodoFilter::Pending, _) => TodoQuery::new().with(Condition::Completed(false)),
            (TodoFilter::Archived, _) => TodoQuery::new().with(Condition::Archived(true)),
            (TodoFilter::User, UserSelection::All) => TodoQuery::new().with(Condition::Archived(false)),
            (TodoFilter::User, UserSelection::Email(email)) => TodoQuery::new()
                .with(Condition::Archived(false))
                .with(Condition::AuthorEmail(email.clone())),
        }
    }
}
