//! Shared Todo Frontend App
//!
//! Session tracking plus the route gate in front of the views.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use todo_core::routes::{HOME_PATH, LOGIN_PATH};
use todo_core::{resolve_route, AppConfig, ConfigError, RouteView, SessionController, UserIdentity};

use crate::commands::{FirebaseAuth, FirestoreTodos};
use crate::components::{NotFoundView, SignInView, TodoListView};
use crate::context::{use_app_context, AppContext};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let (user, set_user) = signal(None::<UserIdentity>);
    let (auth_ready, set_auth_ready) = signal(false);

    let session = SessionController::start(FirebaseAuth, move |identity| {
        set_user.set(identity);
        set_auth_ready.set(true);
    });
    let session = StoredValue::new_local(Some(session));
    on_cleanup(move || {
        session.try_update_value(|held| {
            held.take();
        });
    });

    provide_context(AppContext::new(
        user,
        auth_ready,
        session,
        FirestoreTodos::new(config.collection),
    ));

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundView /> }>
                <Route path=path!("/") view=|| view! { <RouteGate path=HOME_PATH /> } />
                <Route path=path!("/login") view=|| view! { <RouteGate path=LOGIN_PATH /> } />
            </Routes>
        </Router>
    }
}

/// Renders what `path` resolves to for the current session
#[component]
fn RouteGate(path: &'static str) -> impl IntoView {
    let ctx = use_app_context();
    let signed_in = Memo::new(move |_| ctx.user.with(Option::is_some));

    move || {
        if !ctx.auth_ready.get() {
            return view! { <p class="loading">"Loading..."</p> }.into_any();
        }
        match resolve_route(path, signed_in.get()) {
            RouteView::Todos => view! { <TodoListView /> }.into_any(),
            RouteView::SignIn => view! { <SignInView /> }.into_any(),
            RouteView::NotFound => view! { <NotFoundView /> }.into_any(),
            RouteView::Redirect(to) => view! { <Redirect path=to /> }.into_any(),
        }
    }
}

/// Shown instead of the router when the page was served without usable settings
#[component]
pub fn ConfigErrorView(error: ConfigError) -> impl IntoView {
    view! {
        <div class="config-error">
            <h1>"Configuration required"</h1>
            <p class="config-error__message">{error.to_string()}</p>
            <p>
                "Copy " <code>"config.example.js"</code> " to " <code>"config.js"</code>
                " and fill in your Firebase project settings."
            </p>
        </div>
    }
}
