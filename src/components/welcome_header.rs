//! Welcome Header Component
//!
//! Greets the signed-in user and offers sign-out.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use todo_core::routes::LOGIN_PATH;
use todo_core::SessionController;

use crate::context::use_app_context;
use crate::store::{store_report_error, use_todo_store};

#[component]
pub fn WelcomeHeader() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();
    let navigate = StoredValue::new(use_navigate());

    let greeting = move || {
        ctx.user
            .with(|user| user.as_ref().map(|u| format!("Welcome, {}!", u.greeting_name())))
            .unwrap_or_default()
    };

    let sign_out = move |_| {
        let Some(pending) = ctx
            .session()
            .try_with_value(|held| held.as_ref().map(SessionController::sign_out))
            .flatten()
        else {
            return;
        };
        spawn_local(async move {
            match pending.await {
                Ok(()) => {
                    // the route gate may already have unmounted this view
                    navigate.try_with_value(|nav| nav(LOGIN_PATH, Default::default()));
                }
                Err(err) => store_report_error(&store, "sign out", None, &err),
            }
        });
    };

    view! {
        <header class="welcome-header">
            <h1>{greeting}</h1>
            <button class="logout-button" on:click=sign_out>"Sign out"</button>
        </header>
    }
}
