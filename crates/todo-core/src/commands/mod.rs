//! Todo Commands
//!
//! Operations issued by the list view, expressed against any
//! [`DocumentStore`](crate::repository::DocumentStore).

mod todo_cmd;

pub use todo_cmd::*;
