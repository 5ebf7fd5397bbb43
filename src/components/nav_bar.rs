//! Navigation Bar Component
//!
//! Screen tabs, theme toggle, and the signed-in identity.

use leptos::prelude::*;

use crate::app::Screen;
use crate::store::{
    clear_session, notify, toggle_theme, use_chrome, ChromeStateStoreFields, ToastLevel,
};

#[component]
pub fn NavBar(
    screen: ReadSignal<Screen>,
    set_screen: WriteSignal<Screen>,
) -> impl IntoView {
    let store = use_chrome();

    let user_name = move || {
        store
            .session()
            .with(|s| s.as_ref().map(|s| s.user.display_name.clone()).unwrap_or_default())
    };
    let theme_label = move || match store.theme().get() {
        crate::store::Theme::Light => "Dark mode",
        crate::store::Theme::Dark => "Light mode",
    };

    view! {
        <header class="nav-bar">
            <span class="nav-brand">"Casedesk"</span>
            <nav class="nav-tabs">
                {Screen::ALL
                    .iter()
                    .map(|&tab| {
                        let is_active = move || screen.get() == tab;
                        view! {
                            <button
                                class=move || if is_active() { "nav-tab active" } else { "nav-tab" }
                                on:click=move |_| set_screen.set(tab)
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="nav-actions">
                <button class="theme-toggle" on:click=move |_| toggle_theme(&store)>
                    {theme_label}
                </button>
                <span class="nav-user">{user_name}</span>
                <button
                    class="logout-btn"
                    on:click=move |_| {
                        clear_session(&store);
                        notify(&store, ToastLevel::Info, "Signed out.");
                    }
                >
                    "Sign out"
                </button>
            </div>
        </header>
    }
}
