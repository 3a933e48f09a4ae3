//! Domain Layer
//!
//! Todo entities, filter/query model and the rules that gate mutations.
//! This layer has NO backend dependencies (except serde/chrono for the wire shape).

mod filter;
mod identity;
mod outcome;
mod permissions;
mod query;
mod roster;
mod todo;

pub use filter::{FilterState, TodoFilter, UserSelection};
pub use identity::{Author, UserIdentity};
pub use outcome::{IgnoreReason, Outcome};
pub use permissions::{can_archive, can_modify, can_toggle_completed, can_toggle_lock, is_author};
pub use query::{Condition, TodoQuery};
pub use roster::derive_roster;
pub use todo::{NewTodo, TodoId, TodoItem, TodoPatch};
