//! Subscription Handle
//!
//! Owned handle for a live subscription. Dropping it releases the
//! subscription, so a handle can never be left dangling.

use std::fmt;

/// A live subscription; released on drop
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    label: String,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(label: impl Into<String>, release: impl FnOnce() + 'static) -> Self {
        let label = label.into();
        tracing::debug!(target: "subscription", %label, "acquired");
        Self {
            label,
            release: Some(Box::new(release)),
        }
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::debug!(target: "subscription", label = %self.label, "released");
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("active", &self.release.is_some())
            .finish()
    }
}
