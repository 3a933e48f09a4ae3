//! Delete Confirm Button Component
//!
//! Inline delete confirmation with confirm/cancel actions.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a "Delete" button initially. When clicked, shows "Delete?" with ✓/✗.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button class="delete-btn" on:click=move |_| set_confirming.set(true)>"Delete"</button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |_| {
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button class="cancel-btn" on:click=move |_| set_confirming.set(false)>"✗"</button>
            </span>
        </Show>
    }
}
