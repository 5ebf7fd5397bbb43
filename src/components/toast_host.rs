//! Toast Host Component
//!
//! Renders the transient notification stack in a fixed overlay.
//! Toasts schedule their own dismissal when pushed (see store).

use leptos::prelude::*;

use crate::store::{dismiss_toast, use_chrome, ChromeStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_chrome();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.level.class() on:click=move |_| dismiss_toast(&store, id)>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
