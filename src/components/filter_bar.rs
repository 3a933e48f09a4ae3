//! Filter Bar Component
//!
//! Filter buttons plus the author selector shown under "By user".

use leptos::prelude::*;
use todo_core::{TodoFilter, UserSelection};
use wasm_bindgen::JsCast;

use crate::store::{use_todo_store, TodoViewStateStoreFields};

#[component]
pub fn FilterBar() -> impl IntoView {
    let store = use_todo_store();
    let active = Memo::new(move |_| store.board().with(|board| board.filters.filter()));

    view! {
        <div class="filter-bar">
            <div class="filter-buttons">
                {TodoFilter::ALL.iter().map(|&filter| {
                    view! {
                        <button
                            type="button"
                            class=move || if active.get() == filter { "filter-btn active" } else { "filter-btn" }
                            on:click=move |_| store.board().write().select_filter(filter)
                        >
                            {filter.label()}
                        </button>
                    }
                }).collect_view()}
            </div>

            <Show when=move || active.get() == TodoFilter::User>
                <UserSelect />
            </Show>
        </div>
    }
}

/// Author selector fed by the roster query
#[component]
fn UserSelect() -> impl IntoView {
    let store = use_todo_store();
    let selected = move || store.board().with(|board| board.filters.selected_user().as_value().to_string());

    view! {
        <select
            class="user-select"
            prop:value=selected
            on:change=move |ev| {
                let Some(select) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok()) else {
                    return;
                };
                store.board().write().select_user(UserSelection::from_value(&select.value()));
            }
        >
            <option value="">"All users"</option>
            <For
                each=move || store.roster().get()
                key=|author| author.email.clone()
                let:author
            >
                <option value=author.email.clone()>{author.label().to_string()}</option>
            </For>
        </select>
    }
}
