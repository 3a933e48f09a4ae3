//! Todo Row Component
//!
//! One item: completion checkbox, text or edit box, author line and the
//! actions the signed-in user is allowed to take.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::commands::{commit_edit, delete_todo, toggle_archived, toggle_completed, toggle_locked};
use todo_core::domain::{can_archive, can_modify, can_toggle_completed, can_toggle_lock};
use todo_core::TodoItem;
use wasm_bindgen::JsCast;

use super::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{store_report, store_update_board, use_todo_store, TodoViewStateStoreFields};

/// Creation time as shown under the text, in local time
fn created_label(item: &TodoItem) -> String {
    item.created_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[component]
pub fn TodoRow(item: TodoItem) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    let viewer = ctx.actor().map(|user| user.email).unwrap_or_default();
    let may_modify = can_modify(&item, &viewer).is_ok();
    let may_toggle = can_toggle_completed(&item, &viewer).is_ok();
    let may_lock = can_toggle_lock(&item, &viewer).is_ok();
    let may_archive = can_archive(&item).is_ok();

    let id = item.id.clone();
    let editing = Memo::new(move |_| store.board().with(|board| board.is_editing(&id)));

    let edit_input = NodeRef::<leptos::html::Input>::new();
    Effect::new(move |_| {
        if editing.get() {
            if let Some(input) = edit_input.get() {
                let _ = input.focus();
            }
        }
    });

    let item = StoredValue::new(item);

    let on_toggle = move |_| {
        let Some(actor) = ctx.actor() else { return };
        let todos = ctx.todos();
        let item = item.get_value();
        spawn_local(async move {
            let result = toggle_completed(&todos, &actor, &item).await;
            store_report(&store, "update todo", Some(&item.id), &result);
        });
    };

    let on_commit = move || {
        let Some(actor) = ctx.actor() else { return };
        let Some(edit) = store.board().with_untracked(|board| board.editing.clone()) else { return };
        let todos = ctx.todos();
        spawn_local(async move {
            let result = commit_edit(&todos, &actor, &edit).await;
            store_report(&store, "save todo", Some(&edit.id), &result);
            store_update_board(&store, |board| board.finish_commit(&edit.id, &result));
        });
    };

    let on_delete = move || {
        let Some(actor) = ctx.actor() else { return };
        let todos = ctx.todos();
        let item = item.get_value();
        spawn_local(async move {
            let result = delete_todo(&todos, &actor, &item).await;
            store_report(&store, "delete todo", Some(&item.id), &result);
            store_update_board(&store, |board| board.finish_delete(&item.id, &result));
        });
    };

    let on_archive = move |_| {
        let todos = ctx.todos();
        let item = item.get_value();
        spawn_local(async move {
            let result = toggle_archived(&todos, &item).await;
            store_report(&store, "archive todo", Some(&item.id), &result);
        });
    };

    let on_lock = move |_| {
        let Some(actor) = ctx.actor() else { return };
        let todos = ctx.todos();
        let item = item.get_value();
        spawn_local(async move {
            let result = toggle_locked(&todos, &actor, &item).await;
            store_report(&store, "lock todo", Some(&item.id), &result);
        });
    };

    let (completed, archived, locked) = item.with_value(|i| (i.completed, i.archived, i.locked));
    let text = item.with_value(|i| i.text.clone());
    let author = item.with_value(|i| i.author_label().to_string());
    let created = item.with_value(created_label);

    view! {
        <li class=move || {
            let mut class = String::from("todo-row");
            if completed { class.push_str(" completed"); }
            if archived { class.push_str(" archived"); }
            if editing.get() { class.push_str(" editing"); }
            class
        }>
            <input
                type="checkbox"
                checked=completed
                disabled=!may_toggle
                on:change=on_toggle
            />

            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <span class="todo-text">{text.clone()}</span>
                }
            >
                <input
                    class="edit-input"
                    type="text"
                    node_ref=edit_input
                    prop:value=move || {
                        store.board().with(|board| board.editing.as_ref().map(|e| e.text.clone()).unwrap_or_default())
                    }
                    on:input=move |ev| {
                        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                            return;
                        };
                        store.board().write().set_edit_text(input.value());
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                        "Enter" => on_commit(),
                        "Escape" => store.board().write().cancel_edit(),
                        _ => {}
                    }
                />
                <button class="save-btn" on:click=move |_| on_commit()>"Save"</button>
                <button class="cancel-btn" on:click=move |_| store.board().write().cancel_edit()>"Cancel"</button>
            </Show>

            {locked.then(|| view! { <span class="lock-badge" title="Locked by its author">"🔒"</span> })}

            <span class="todo-meta">
                <span class="todo-author">{author}</span>
                <span class="todo-created">{created}</span>
            </span>

            <span class="todo-actions">
                <Show when=move || may_modify && !editing.get()>
                    <button
                        class="edit-btn"
                        on:click=move |_| item.with_value(|i| store.board().write().begin_edit(i))
                    >
                        "Edit"
                    </button>
                    <DeleteConfirmButton on_confirm=move |_| on_delete() />
                </Show>
                {may_lock.then(|| view! {
                    <button class="lock-btn" on:click=on_lock>
                        {if locked { "Unlock" } else { "Lock" }}
                    </button>
                })}
                {may_archive.then(|| view! {
                    <button class="archive-btn" on:click=on_archive>
                        {if archived { "Unarchive" } else { "Archive" }}
                    </button>
                })}
            </span>
        </li>
    }
}
