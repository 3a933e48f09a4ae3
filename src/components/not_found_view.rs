//! Not Found View Component

use leptos::prelude::*;
use todo_core::routes::HOME_PATH;

#[component]
pub fn NotFoundView() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1 class="not-found__title">"Oops! Page Not Found"</h1>
            <p class="not-found__description">
                "We're sorry, but the page you requested could not be found."
            </p>
            <a href=HOME_PATH class="not-found__button">"Go to Home"</a>
        </div>
    }
}
