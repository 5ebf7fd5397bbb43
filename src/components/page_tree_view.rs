//! Page Tree View Component
//!
//! Renders the CMS page hierarchy with drag-and-drop re-parenting.
//! Drop zones around each row encode a reference page and position:
//! `before-<id>`, `after-children-<id>`, `child-<id>`; hovering the
//! row itself (`page-<id>`) drops inside. The tree is a pure
//! derivation of (pages, expansion set, search query) and is rebuilt
//! whole on every change.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;

use crate::components::page_editor::PageEditTarget;
use crate::components::DeleteConfirmButton;
use crate::dnd;
use crate::markdown::render_markdown_inline;
use crate::models::{Page, PageTreeNode};
use crate::store::{api_for, notify, report_api_error, use_chrome, ChromeStore, ToastLevel};

/// Copyable bundle threaded through the recursive row rendering.
#[derive(Clone, Copy)]
struct TreeViewCtx {
    dnd: DndSignals,
    store: ChromeStore,
    pages: ReadSignal<Vec<Page>>,
    expanded: RwSignal<HashSet<u32>>,
    set_editing: WriteSignal<Option<PageEditTarget>>,
    on_changed: Callback<()>,
}

/// Page tree view with DnD support. The forest is derived by the
/// screen so it can report visible-row counts; this component only
/// renders and moves.
#[component]
pub fn PageTreeView(
    pages: ReadSignal<Vec<Page>>,
    forest: Memo<Vec<PageTreeNode>>,
    expanded: RwSignal<HashSet<u32>>,
    set_editing: WriteSignal<Option<PageEditTarget>>,
    #[prop(into)] on_changed: Callback<()>,
) -> impl IntoView {
    let store = use_chrome();

    // Create DnD signals
    let dnd = create_dnd_signals();

    // Bind global mouseup handler for dropping
    bind_global_mouseup(dnd, move |dragged_id, zone| {
        let Some(spot) = dnd::parse_drop_spot(&zone) else {
            return;
        };
        let current = pages.get_untracked();
        match dnd::resolve_move(dragged_id, spot, &current) {
            None => {
                notify(&store, ToastLevel::Error, "A page cannot be moved under its own subtree.");
            }
            Some(intent) => {
                web_sys::console::log_1(
                    &format!(
                        "[DND] move page {} -> parent {:?}",
                        intent.page_id, intent.new_parent_id
                    )
                    .into(),
                );
                spawn_local(async move {
                    let api = api_for(&store);
                    match api.move_page(intent.page_id, intent.new_parent_id).await {
                        Ok(_) => {
                            // Keep the moved node visible after a reparent.
                            if intent.is_reparent() {
                                if let Some(parent) = intent.new_parent_id {
                                    expanded.update(|set| {
                                        set.insert(parent);
                                    });
                                }
                            }
                            on_changed.run(());
                        }
                        Err(err) => report_api_error(&store, err),
                    }
                });
            }
        }
    });

    let ctx = TreeViewCtx { dnd, store, pages, expanded, set_editing, on_changed };

    view! {
        <div class="tree-view">
            {move || {
                forest
                    .get()
                    .into_iter()
                    .map(|node| node_view(ctx, node, 0))
                    .collect_view()
            }}
        </div>
    }
}

/// One row plus its zones and (when expanded) its children.
fn node_view(ctx: TreeViewCtx, node: PageTreeNode, depth: usize) -> AnyView {
    let page = node.page.clone();
    let id = page.id;
    let is_home = page.is_home();
    let has_children = !node.children.is_empty();
    let is_expanded = node.is_expanded;
    let indent = depth * 24;

    // DnD handlers; the home page is never a drag source.
    let on_mousedown = make_on_mousedown(ctx.dnd, id);
    let on_row_enter = make_on_zone_mouseenter(ctx.dnd, format!("page-{}", id));
    let on_row_leave = make_on_mouseleave(ctx.dnd);

    let dnd = ctx.dnd;
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let row_zone = format!("page-{}", id);
    let is_drop_target = move || dnd.drop_zone_read.get().as_deref() == Some(row_zone.as_str());
    let row_class = move || {
        let mut c = String::from("tree-row-wrapper");
        if is_dragging() {
            c.push_str(" dragging");
        }
        if is_drop_target() {
            c.push_str(" drop-target");
        }
        c
    };

    let toggle_expand = move |_| {
        ctx.expanded.update(|set| {
            if !set.remove(&id) {
                set.insert(id);
            }
        });
    };

    let on_edit = move |_| {
        ctx.set_editing.set(Some(PageEditTarget::Edit(id)));
    };
    let on_add_child = move |_| {
        ctx.set_editing.set(Some(PageEditTarget::Create { parent_id: Some(id) }));
    };
    let on_delete = Callback::new(move |_: ()| {
        let store = ctx.store;
        let on_changed = ctx.on_changed;
        spawn_local(async move {
            let api = api_for(&store);
            match api.delete_page(id).await {
                Ok(()) => {
                    notify(&store, ToastLevel::Success, "Page deleted.");
                    on_changed.run(());
                }
                Err(err) => report_api_error(&store, err),
            }
        });
    });

    let title = page.title.clone();
    let is_published = page.is_published;
    let is_private = page.is_private;
    let flags = move || {
        let mut flags = Vec::new();
        if !is_published {
            flags.push("draft");
        }
        if is_private {
            flags.push("private");
        }
        flags
    };

    view! {
        <DropZone dnd=ctx.dnd zone_id=format!("before-{}", id) indent=indent/>

        <div
            class=row_class
            style=format!("margin-left: {}px;", indent)
            on:mousedown=move |ev| {
                if !is_home {
                    on_mousedown(ev);
                }
            }
            on:mouseenter=on_row_enter
            on:mouseleave=on_row_leave
        >
            {if has_children {
                view! {
                    <button class="collapse-btn" on:click=toggle_expand>
                        {if is_expanded { "▼" } else { "▶" }}
                    </button>
                }
                    .into_any()
            } else {
                view! { <span class="collapse-placeholder">"·"</span> }.into_any()
            }}

            <span class="page-title">{title}</span>
            {page
                .description
                .as_ref()
                .map(|desc| view! { <span class="page-desc muted" inner_html=render_markdown_inline(desc)></span> })}
            {move || {
                flags()
                    .into_iter()
                    .map(|f| view! { <span class=format!("page-flag {}", f)>{f}</span> })
                    .collect_view()
            }}

            <span class="row-actions">
                <button class="edit-btn" on:click=on_edit>"Edit"</button>
                <button class="add-child-btn" on:click=on_add_child>"+"</button>
                {(!is_home)
                    .then(|| view! { <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete/> })}
            </span>
        </div>

        {is_expanded
            .then(|| {
                view! {
                    <div class="tree-children">
                        {node
                            .children
                            .into_iter()
                            .map(|child| node_view(ctx, child, depth + 1))
                            .collect_view()}
                        <DropZone dnd=ctx.dnd zone_id=format!("child-{}", id) indent=indent + 24/>
                    </div>
                }
            })}

        <DropZone dnd=ctx.dnd zone_id=format!("after-children-{}", id) indent=indent/>
    }
    .into_any()
}

/// Drop zone component - a horizontal separator for dropping pages
#[component]
fn DropZone(dnd: DndSignals, zone_id: String, #[prop(optional)] indent: usize) -> impl IntoView {
    let on_mouseenter = make_on_zone_mouseenter(dnd, zone_id.clone());
    let on_mouseleave = make_on_mouseleave(dnd);

    // Is this zone the current drop target?
    let active_id = zone_id.clone();
    let is_active = move || dnd.drop_zone_read.get().as_deref() == Some(active_id.as_str());

    // Only show when dragging
    let is_dragging = move || dnd.dragging_id_read.get().is_some();

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if !is_dragging() {
            c.push_str(" hidden");
        }
        if is_active() {
            c.push_str(" active");
        }
        c
    };

    view! {
        <div
            class=zone_class
            style=format!("margin-left: {}px;", indent)
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}
