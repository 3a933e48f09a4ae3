//! Todo Entity
//!
//! A shared todo item as stored in the hosted document collection.
//! Older documents may lack `completed`, `archived`, `locked`,
//! `authorName` or `createdAt`; those resolve to defaults at read time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::UserIdentity;

/// Store-assigned document identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A todo item read from the store
///
/// `id` is not part of the document body; it comes from the document
/// reference and is attached with [`TodoItem::with_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(skip)]
    pub id: TodoId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub author_name: Option<String>,
}

impl TodoItem {
    /// Decode a document body and attach its identifier
    pub fn from_document(id: TodoId, body: serde_json::Value) -> Result<Self, serde_json::Error> {
        let item: TodoItem = serde_json::from_value(body)?;
        Ok(item.with_id(id))
    }

    pub fn with_id(mut self, id: TodoId) -> Self {
        self.id = id;
        self
    }

    /// Author label: display name, falling back to email
    pub fn author_label(&self) -> &str {
        match self.author_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.author_email,
        }
    }
}

/// Document body for a newly added item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub text: String,
    pub completed: bool,
    pub archived: bool,
    pub locked: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub author_email: String,
    pub author_name: Option<String>,
}

impl NewTodo {
    /// New items start pending, unarchived and unlocked
    pub fn new(text: impl Into<String>, author: &UserIdentity, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            archived: false,
            locked: false,
            created_at,
            author_email: author.email.clone(),
            author_name: author.display_name.clone(),
        }
    }

    /// The item this document becomes once the store assigns `id`
    pub fn into_item(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            text: self.text,
            completed: self.completed,
            archived: self.archived,
            locked: self.locked,
            created_at: self.created_at,
            author_email: self.author_email,
            author_name: self.author_name,
        }
    }
}

/// Partial update: only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl TodoPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Default::default() }
    }

    pub fn completed(completed: bool) -> Self {
        Self { completed: Some(completed), ..Default::default() }
    }

    pub fn archived(archived: bool) -> Self {
        Self { archived: Some(archived), ..Default::default() }
    }

    pub fn locked(locked: bool) -> Self {
        Self { locked: Some(locked), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none() && self.archived.is_none() && self.locked.is_none()
    }

    /// Apply the patch in place (used by the in-memory store)
    pub fn apply_to(&self, item: &mut TodoItem) {
        if let Some(text) = &self.text {
            item.text = text.clone();
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
        if let Some(archived) = self.archived {
            item.archived = archived;
        }
        if let Some(locked) = self.locked {
            item.locked = locked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_document_defaults() {
        let item = TodoItem::from_document(
            TodoId::new("doc-1"),
            json!({ "text": "Old task", "authorEmail": "a@x.io" }),
        )
        .unwrap();

        assert_eq!(item.id.as_str(), "doc-1");
        assert!(!item.completed);
        assert!(!item.archived);
        assert!(!item.locked);
        assert_eq!(item.created_at.timestamp_millis(), 0);
        assert_eq!(item.author_label(), "a@x.io");
    }

    #[test]
    fn test_new_todo_wire_shape() {
        let author = UserIdentity::new("u1", "ana@x.io").with_display_name("Ana");
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let body = serde_json::to_value(NewTodo::new("Buy milk", &author, created_at)).unwrap();

        assert_eq!(
            body,
            json!({
                "text": "Buy milk",
                "completed": false,
                "archived": false,
                "locked": false,
                "createdAt": 1_700_000_000_123_i64,
                "authorEmail": "ana@x.io",
                "authorName": "Ana",
            })
        );
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let body = serde_json::to_value(TodoPatch::locked(true)).unwrap();
        assert_eq!(body, json!({ "locked": true }));
        assert!(TodoPatch::default().is_empty());
    }

    #[test]
    fn test_patch_apply() {
        let author = UserIdentity::new("u1", "ana@x.io");
        let mut item = NewTodo::new("Draft", &author, Utc::now()).into_item(TodoId::new("1"));
        TodoPatch { text: Some("Final".into()), completed: Some(true), ..Default::default() }.apply_to(&mut item);
        assert_eq!(item.text, "Final");
        assert!(item.completed);
        assert!(!item.archived);
    }
}
