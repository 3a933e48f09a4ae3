//! Shared Todo Core
//!
//! Layered architecture:
//! - domain: Todo entities, filters, queries and authorization rules
//! - repository: Backend seams (document store, identity provider) and an in-memory backend
//! - commands: Todo operations issued by the list view
//! - session / routes / config: Session tracking, route gating and connection settings

pub mod board;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod routes;
pub mod session;

pub use board::{BoardState, EditBuffer};
pub use config::{AppConfig, ConfigError, FirebaseOptions, LogLevel};
pub use domain::{
    derive_roster, Author, Condition, FilterState, IgnoreReason, NewTodo, Outcome, TodoFilter,
    TodoId, TodoItem, TodoPatch, TodoQuery, UserIdentity, UserSelection,
};
pub use error::{TodoError, TodoResult};
pub use repository::{
    DocumentStore, IdentityCallback, IdentityProvider, MemoryIdentity, MemoryStore,
    SnapshotCallback, Subscription,
};
pub use routes::{resolve_route, RouteView};
pub use session::SessionController;
