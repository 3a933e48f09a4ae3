//! Command Outcomes
//!
//! Rule violations are not errors: the command simply does nothing and
//! reports why.

use std::fmt;

/// Why a command made no store call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Text was empty or whitespace only
    EmptyText,
    /// Item is locked and the actor is not its author
    Locked,
    /// Only the author may do this
    NotAuthor,
    /// Archiving requires a completed item
    NotCompleted,
    /// Completion is frozen while the item is archived
    Archived,
    /// The acting identity has no email
    SignedOut,
    /// The item no longer exists in the store
    Missing,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            IgnoreReason::EmptyText => "text is empty",
            IgnoreReason::Locked => "item is locked by its author",
            IgnoreReason::NotAuthor => "only the author may do this",
            IgnoreReason::NotCompleted => "item is not completed",
            IgnoreReason::Archived => "item is archived",
            IgnoreReason::SignedOut => "no signed-in author",
            IgnoreReason::Missing => "item no longer exists",
        };
        f.write_str(msg)
    }
}

/// Result of a command that did not hit a backend error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Applied(T),
    Ignored(IgnoreReason),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn ignored_reason(&self) -> Option<IgnoreReason> {
        match self {
            Outcome::Ignored(reason) => Some(*reason),
            Outcome::Applied(_) => None,
        }
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Ignored(_) => None,
        }
    }
}
