//! Repository Layer
//!
//! Backend abstractions and the in-memory implementation.

mod memory;
mod subscription;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::{MemoryIdentity, MemoryStore};
pub use subscription::Subscription;
pub use traits::{DocumentStore, IdentityCallback, IdentityProvider, SnapshotCallback};
