//! Todo List View Component
//!
//! Owns the live queries for the active filter and for the author roster.

use leptos::prelude::*;
use leptos_live_query::use_live_query;
use reactive_stores::Store;
use todo_core::{derive_roster, DocumentStore, FilterState, SnapshotCallback, TodoQuery};

use super::{FilterBar, NewTodoForm, TodoRow, WelcomeHeader};
use crate::context::use_app_context;
use crate::store::{store_clear_status, store_report_error, TodoStore, TodoViewState, TodoViewStateStoreFields};

#[component]
pub fn TodoListView() -> impl IntoView {
    let ctx = use_app_context();
    let store: TodoStore = Store::new(TodoViewState::default());
    provide_context(store);

    // Only the filter selection drives re-subscription, not draft or edit typing
    let filters = Memo::new(move |_| store.board().with(|board| board.filters.clone()));

    use_live_query(
        move || filters.get(),
        move |filters: &FilterState| {
            let query = filters.query();
            let on_snapshot: SnapshotCallback = Box::new(move |snapshot| match snapshot {
                Ok(items) => *store.items().write() = items,
                Err(err) => store_report_error(&store, "load todos", None, &err),
            });
            ctx.todos()
                .subscribe(&query, on_snapshot)
                .map_err(|err| store_report_error(&store, "load todos", None, &err))
                .ok()
        },
    );

    use_live_query(
        || (),
        move |_| {
            let on_snapshot: SnapshotCallback = Box::new(move |snapshot| match snapshot {
                Ok(items) => *store.roster().write() = derive_roster(&items),
                Err(err) => store_report_error(&store, "load authors", None, &err),
            });
            ctx.todos()
                .subscribe(&TodoQuery::roster(), on_snapshot)
                .map_err(|err| store_report_error(&store, "load authors", None, &err))
                .ok()
        },
    );

    view! {
        <div class="todo-app">
            <WelcomeHeader />
            <NewTodoForm />
            <FilterBar />

            {move || store.status().get().map(|message| view! {
                <div class="status-message" role="alert">
                    <span>{message}</span>
                    <button class="dismiss-btn" on:click=move |_| store_clear_status(&store)>"×"</button>
                </div>
            })}

            <ul class="todo-list">
                <For
                    each=move || store.items().get()
                    key=|item| (item.id.clone(), item.text.clone(), item.completed, item.archived, item.locked)
                    let:item
                >
                    <TodoRow item=item />
                </For>
            </ul>

            <Show when=move || store.items().with(Vec::is_empty)>
                <p class="empty-list">"Nothing here yet."</p>
            </Show>

            <p class="item-count">{move || format!("{} items", store.items().with(Vec::len))}</p>
        </div>
    }
}
