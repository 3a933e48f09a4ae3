//! Authorization Rules
//!
//! Uniform gate for every mutation. The view uses the same functions to
//! decide which controls to render.

use super::outcome::IgnoreReason;
use super::todo::TodoItem;

/// Whether `actor_email` authored `item`
pub fn is_author(item: &TodoItem, actor_email: &str) -> bool {
    !actor_email.is_empty() && item.author_email == actor_email
}

/// Toggle, edit and delete: unlocked items are open to everyone,
/// locked items only to their author
pub fn can_modify(item: &TodoItem, actor_email: &str) -> Result<(), IgnoreReason> {
    if !item.locked || is_author(item, actor_email) {
        Ok(())
    } else {
        Err(IgnoreReason::Locked)
    }
}

/// Completion: the modify rule, and never while archived. Un-completing an
/// archived item would leave it with no way back out of the archive.
pub fn can_toggle_completed(item: &TodoItem, actor_email: &str) -> Result<(), IgnoreReason> {
    if item.archived {
        return Err(IgnoreReason::Archived);
    }
    can_modify(item, actor_email)
}

/// Lock toggling is author-only, locked or not
pub fn can_toggle_lock(item: &TodoItem, actor_email: &str) -> Result<(), IgnoreReason> {
    if is_author(item, actor_email) {
        Ok(())
    } else {
        Err(IgnoreReason::NotAuthor)
    }
}

/// Archiving needs a completed item; the lock does not apply
pub fn can_archive(item: &TodoItem) -> Result<(), IgnoreReason> {
    if item.completed {
        Ok(())
    } else {
        Err(IgnoreReason::NotCompleted)
    }
}
