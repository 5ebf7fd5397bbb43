//! Casedesk Frontend App
//!
//! Root component: chrome store, login gate, screen switching.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api;
use crate::components::{
    BreadcrumbBar, CompaniesScreen, LoginScreen, NavBar, PagesScreen, PeopleScreen,
    ProfileScreen, ToastHost, VideosScreen,
};
use crate::store::{use_chrome, ChromeState, ChromeStateStoreFields};

/// Top-level screens, switched by the nav bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Pages,
    People,
    Companies,
    Videos,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Pages,
        Screen::People,
        Screen::Companies,
        Screen::Videos,
        Screen::Profile,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Pages => "Pages",
            Screen::People => "People",
            Screen::Companies => "Companies",
            Screen::Videos => "Videos",
            Screen::Profile => "Profile",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(ChromeState::new(api::default_base_url()));
    provide_context(store);

    let (screen, set_screen) = signal(Screen::Pages);

    view! {
        <AppShell screen=screen set_screen=set_screen/>
    }
}

#[component]
fn AppShell(screen: ReadSignal<Screen>, set_screen: WriteSignal<Screen>) -> impl IntoView {
    let store = use_chrome();

    let shell_class = move || format!("app-shell {}", store.theme().get().class());
    let signed_in = move || store.session().with(|s| s.is_some());

    view! {
        <div class=shell_class>
            <Show
                when=signed_in
                fallback=|| view! { <LoginScreen/> }
            >
                <NavBar screen=screen set_screen=set_screen/>
                <BreadcrumbBar/>
                <main class="main-content">
                    {move || match screen.get() {
                        Screen::Pages => view! { <PagesScreen/> }.into_any(),
                        Screen::People => view! { <PeopleScreen/> }.into_any(),
                        Screen::Companies => view! { <CompaniesScreen/> }.into_any(),
                        Screen::Videos => view! { <VideosScreen/> }.into_any(),
                        Screen::Profile => view! { <ProfileScreen/> }.into_any(),
                    }}
                </main>
            </Show>
            <ToastHost/>
        </div>
    }
}
