//! Query Model
//!
//! Predicate plus ordering for subscriptions and one-shot reads.
//! Ordering is part of the query value, so a query can never be issued
//! without it.

use serde::{Deserialize, Serialize};

use super::todo::TodoItem;

/// Equality condition over a todo field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Completed(bool),
    Archived(bool),
    AuthorEmail(String),
}

impl Condition {
    /// Document field name as stored
    pub fn field(&self) -> &'static str {
        match self {
            Condition::Completed(_) => "completed",
            Condition::Archived(_) => "archived",
            Condition::AuthorEmail(_) => "authorEmail",
        }
    }

    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Condition::Completed(v) => item.completed == *v,
            Condition::Archived(v) => item.archived == *v,
            Condition::AuthorEmail(email) => item.author_email == *email,
        }
    }
}

/// Conjunction of conditions, oldest first by creation time
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoQuery {
    conditions: Vec<Condition>,
}

impl TodoQuery {
    /// Field every query orders by
    pub const ORDER_FIELD: &'static str = "createdAt";
    pub const ORDER_DIRECTION: &'static str = "asc";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Items authored by `email`, archived or not
    pub fn by_author(email: impl Into<String>) -> Self {
        Self::new().with(Condition::AuthorEmail(email.into()))
    }

    /// Live roster source: every non-archived item
    pub fn roster() -> Self {
        Self::new().with(Condition::Archived(false))
    }

    pub fn matches(&self, item: &TodoItem) -> bool {
        self.conditions.iter().all(|c| c.matches(item))
    }

    /// Filter and order a full collection the way the store would
    pub fn evaluate<'a, I>(&self, items: I) -> Vec<TodoItem>
    where
        I: IntoIterator<Item = &'a TodoItem>,
    {
        let mut selected: Vec<TodoItem> = items.into_iter().filter(|i| self.matches(i)).cloned().collect();
        selected.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        selected
    }
}
