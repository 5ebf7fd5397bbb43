//! Pages Screen
//!
//! CMS page tree: search, drag-and-drop re-parenting, and the page
//! editor column. The flat list refetches after every mutation; the
//! tree is derived from it.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::page_editor::PageEditTarget;
use crate::components::{PageEditor, PageTreeView};
use crate::models::{Page, HOME_PAGE_ID};
use crate::store::{api_for, report_api_error, set_breadcrumbs, use_chrome};
use crate::tree;

#[component]
pub fn PagesScreen() -> impl IntoView {
    let store = use_chrome();

    let (pages, set_pages) = signal(Vec::<Page>::new());
    let (query, set_query) = signal(String::new());
    let (editing, set_editing) = signal::<Option<PageEditTarget>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let expanded = RwSignal::new(HashSet::from([HOME_PAGE_ID]));

    Effect::new(move |_| {
        set_breadcrumbs(&store, &["Casedesk", "Pages"]);
    });

    // Load pages on mount and after every mutation
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        spawn_local(async move {
            let api = api_for(&store);
            match api.list_pages().await {
                Ok(loaded) => {
                    web_sys::console::log_1(
                        &format!("[PAGES] Loaded {} pages, trigger={}", loaded.len(), trigger).into(),
                    );
                    set_pages.set(loaded);
                }
                Err(err) => report_api_error(&store, err),
            }
        });
    });

    let reload = Callback::new(move |_: ()| {
        set_reload_trigger.update(|v| *v += 1);
    });

    // Derived forest: rebuilt whole from the flat list on any change.
    let forest = Memo::new(move |_| {
        let mut roots = tree::build_page_tree(&pages.get());
        tree::apply_expansion(&mut roots, &expanded.get());
        tree::filter_tree(&roots, &query.get())
    });

    view! {
        <div class="pages-screen">
            <div class="pages-main">
                <div class="pages-toolbar">
                    <input
                        type="search"
                        class="tree-search"
                        placeholder="Filter pages..."
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <button
                        class="new-page-btn"
                        on:click=move |_| set_editing.set(Some(PageEditTarget::Create { parent_id: None }))
                    >
                        "New page"
                    </button>
                </div>

                <PageTreeView
                    pages=pages
                    forest=forest
                    expanded=expanded
                    set_editing=set_editing
                    on_changed=reload
                />

                <p class="item-count">
                    {move || {
                        format!(
                            "{} pages, {} rows visible",
                            pages.get().len(),
                            tree::flatten_tree(&forest.get()).len(),
                        )
                    }}
                </p>
            </div>

            <PageEditor
                editing=editing
                set_editing=set_editing
                pages=pages
                on_saved=reload
            />
        </div>
    }
}
