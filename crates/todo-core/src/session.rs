//! Session Controller
//!
//! Tracks the provider's current identity for as long as the controller
//! lives. Sign-in and sign-out go straight to the provider; the resulting
//! identity change arrives through the same subscription.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::domain::UserIdentity;
use crate::error::TodoResult;
use crate::repository::{IdentityProvider, Subscription};

pub struct SessionController<P: IdentityProvider> {
    provider: P,
    current: Rc<RefCell<Option<UserIdentity>>>,
    _subscription: Subscription,
}

impl<P: IdentityProvider> SessionController<P> {
    /// Subscribe to `provider`; `on_change` runs for every notification
    /// after the held identity has been replaced
    pub fn start(provider: P, on_change: impl Fn(Option<UserIdentity>) + 'static) -> Self {
        let current = Rc::new(RefCell::new(None));
        let held = current.clone();
        let subscription = provider.subscribe(Box::new(move |identity: Option<UserIdentity>| {
            match &identity {
                Some(user) => tracing::info!(uid = %user.uid, "session active"),
                None => tracing::info!("signed out"),
            }
            *held.borrow_mut() = identity.clone();
            on_change(identity);
        }));

        Self {
            provider,
            current,
            _subscription: subscription,
        }
    }

    /// Identity from the latest notification
    pub fn current(&self) -> Option<UserIdentity> {
        self.current.borrow().clone()
    }
}

impl<P: IdentityProvider + Clone + 'static> SessionController<P> {
    /// Start an interactive sign-in. The future owns its provider handle,
    /// so it can outlive a borrow of the controller.
    pub fn sign_in(&self) -> impl Future<Output = TodoResult<UserIdentity>> + 'static {
        let provider = self.provider.clone();
        async move { sign_in(&provider).await }
    }

    pub fn sign_out(&self) -> impl Future<Output = TodoResult<()>> + 'static {
        let provider = self.provider.clone();
        async move { sign_out(&provider).await }
    }
}

/// Interactive sign-in; failures are logged and returned for display
pub async fn sign_in<P: IdentityProvider + ?Sized>(provider: &P) -> TodoResult<UserIdentity> {
    match provider.sign_in_interactive().await {
        Ok(user) => {
            tracing::info!(uid = %user.uid, "signed in");
            Ok(user)
        }
        Err(err) => {
            tracing::warn!(error = %err, "sign-in failed");
            Err(err)
        }
    }
}

/// End the session; failures are logged and returned, never fatal
pub async fn sign_out<P: IdentityProvider + ?Sized>(provider: &P) -> TodoResult<()> {
    provider.sign_out().await.map_err(|err| {
        tracing::warn!(error = %err, "sign-out failed");
        err
    })
}
