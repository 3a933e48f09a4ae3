//! New Todo Form Component
//!
//! Draft input for adding items as the signed-in user.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::commands::add_todo;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::store::{store_report, store_update_board, use_todo_store, TodoViewStateStoreFields};

#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();
    let (pending, set_pending) = signal(false);

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(actor) = ctx.actor() else { return };
        let text = store.board().with_untracked(|board| board.draft.clone());
        let todos = ctx.todos();
        set_pending.set(true);

        spawn_local(async move {
            let result = add_todo(&todos, &actor, &text, Utc::now()).await;
            store_report(&store, "add todo", None, &result);
            store_update_board(&store, |board| board.finish_add(&text, &result));
            let _ = set_pending.try_set(false);
        });
    };

    view! {
        <form class="new-todo-form" on:submit=create_todo>
            <input
                type="text"
                placeholder="What needs to be done?"
                prop:value=move || store.board().with(|board| board.draft.clone())
                on:input=move |ev| {
                    let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                        return;
                    };
                    store.board().write().draft = input.value();
                }
            />
            <button type="submit" disabled=move || pending.get()>"Add"</button>
        </form>
    }
}
