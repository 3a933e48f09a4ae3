//! Sign-In View Component
//!
//! One button for Google popup sign-in. The session controller picks up
//! the new identity; this view only reports failures.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::SessionController;

use crate::context::use_app_context;

#[component]
pub fn SignInView() -> impl IntoView {
    let ctx = use_app_context();
    let (pending, set_pending) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let sign_in = move |_| {
        let Some(pending_sign_in) = ctx
            .session()
            .try_with_value(|held| held.as_ref().map(SessionController::sign_in))
            .flatten()
        else {
            return;
        };
        set_pending.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = pending_sign_in.await;
            // on success the route gate swaps this view out
            let _ = set_pending.try_set(false);
            if let Err(err) = result {
                let _ = set_error.try_set(Some(err.to_string()));
            }
        });
    };

    view! {
        <div class="login-container">
            <h1>"Sign in with Google"</h1>
            <button class="login-button" disabled=move || pending.get() on:click=sign_in>
                {move || if pending.get() { "Signing in..." } else { "Sign in with Google" }}
            </button>
            {move || error.get().map(|message| view! { <p class="login-error">{message}</p> })}
        </div>
    }
}
