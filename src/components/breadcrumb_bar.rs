//! Breadcrumb Bar Component
//!
//! Renders the trail the active screen published.

use leptos::prelude::*;

use crate::store::{use_chrome, ChromeStateStoreFields};

#[component]
pub fn BreadcrumbBar() -> impl IntoView {
    let store = use_chrome();

    view! {
        <nav class="breadcrumb-bar">
            {move || {
                let crumbs = store.breadcrumbs().get();
                let last = crumbs.len().saturating_sub(1);
                crumbs
                    .into_iter()
                    .enumerate()
                    .map(|(i, crumb)| {
                        view! {
                            <span class=if i == last { "crumb current" } else { "crumb" }>
                                {crumb.label}
                            </span>
                            {(i != last).then(|| view! { <span class="crumb-sep">"/"</span> })}
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}
