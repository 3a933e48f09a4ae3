//! Author Roster
//!
//! Distinct authors among non-archived items, in first-seen order.

use std::collections::HashSet;

use super::identity::Author;
use super::todo::TodoItem;

/// Full scan of the snapshot.
// TODO: maintain incrementally from snapshot diffs once collections grow past a few hundred items.
pub fn derive_roster(items: &[TodoItem]) -> Vec<Author> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| !item.archived && !item.author_email.is_empty())
        .filter(|item| seen.insert(item.author_email.as_str()))
        .map(|item| Author {
            email: item.author_email.clone(),
            display_name: item.author_name.clone(),
        })
        .collect()
}
