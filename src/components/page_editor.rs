//! Page Editor Column
//!
//! Side column for creating or editing a page: title, slug, flags,
//! and a markdown description with side-by-side preview. Description
//! edits autosave on the debounced policy; the Save button takes the
//! immediate path.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PageDraft;
use crate::autosave::{Debouncer, SavePolicy};
use crate::markdown::render_markdown;
use crate::models::Page;
use crate::store::{api_for, notify, report_api_error, use_chrome, ToastLevel};
use crate::tree;
use crate::validate::{self, FieldErrors};

const TITLE_MAX: usize = 200;
const SLUG_MAX: usize = 100;

/// What the editor column is pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEditTarget {
    Create { parent_id: Option<u32> },
    Edit(u32),
}

#[component]
pub fn PageEditor(
    editing: ReadSignal<Option<PageEditTarget>>,
    set_editing: WriteSignal<Option<PageEditTarget>>,
    pages: ReadSignal<Vec<Page>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let store = use_chrome();

    let (title, set_title) = signal(String::new());
    let (slug, set_slug) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (is_published, set_is_published) = signal(false);
    let (is_private, set_is_private) = signal(false);
    let (parent_id, set_parent_id) = signal::<Option<u32>>(None);
    let (errors, set_errors) = signal(FieldErrors::new());

    // Track which target we're editing to avoid resetting fields on reload
    let (last_target, set_last_target) = signal::<Option<PageEditTarget>>(None);

    // Timer handles are not Send; park the debouncer in local storage
    // and pass the Copy handle around.
    let autosave = StoredValue::new_local(Debouncer::new(SavePolicy::default()));

    // Load fields when the editing target changes
    Effect::new(move |_| {
        let target = editing.get();
        if target == last_target.get() {
            return;
        }
        set_last_target.set(target);
        set_errors.set(FieldErrors::new());
        match target {
            Some(PageEditTarget::Edit(id)) => {
                if let Some(page) = pages.get().iter().find(|p| p.id == id) {
                    set_title.set(page.title.clone());
                    set_slug.set(page.slug.clone().unwrap_or_default());
                    set_description.set(page.description.clone().unwrap_or_default());
                    set_is_published.set(page.is_published);
                    set_is_private.set(page.is_private);
                    set_parent_id.set(page.parent_id);
                }
            }
            Some(PageEditTarget::Create { parent_id }) => {
                set_title.set(String::new());
                set_slug.set(String::new());
                set_description.set(String::new());
                set_is_published.set(false);
                set_is_private.set(false);
                set_parent_id.set(parent_id);
            }
            None => {}
        }
    });

    // The draft reflecting the current field values. Re-parenting an
    // existing page goes through drag-and-drop, not this form, but
    // the update endpoint still wants the current parent.
    let current_draft = move || {
        let slug = slug.get_untracked().trim().to_string();
        let description = description.get_untracked();
        PageDraft {
            title: title.get_untracked().trim().to_string(),
            description: (!description.trim().is_empty()).then_some(description),
            parent_id: parent_id.get_untracked(),
            is_published: is_published.get_untracked(),
            is_private: is_private.get_untracked(),
            slug: (!slug.is_empty()).then_some(slug),
        }
    };

    // Debounced autosave for description edits on an existing page.
    let schedule_autosave = move || {
        if let Some(PageEditTarget::Edit(id)) = editing.get_untracked() {
            let draft = current_draft();
            autosave.with_value(|autosave| {
                autosave.schedule(move || {
                    spawn_local(async move {
                        let api = api_for(&store);
                        if let Err(err) = api.update_page(id, &draft).await {
                            report_api_error(&store, err);
                        }
                    });
                });
            });
        }
    };

    let validate_fields = move || {
        let mut field_errors = FieldErrors::new();
        validate::required(&mut field_errors, "title", &title.get_untracked());
        validate::max_len(&mut field_errors, "title", &title.get_untracked(), TITLE_MAX);
        validate::max_len(&mut field_errors, "slug", &slug.get_untracked(), SLUG_MAX);
        field_errors
    };

    // Immediate save path.
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        // The full draft supersedes any pending debounced write.
        autosave.with_value(|a| a.cancel());

        let field_errors = validate_fields();
        if !field_errors.is_empty() {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());

        let target = editing.get_untracked();
        let draft = current_draft();
        spawn_local(async move {
            let api = api_for(&store);
            let result = match target {
                Some(PageEditTarget::Edit(id)) => api.update_page(id, &draft).await,
                Some(PageEditTarget::Create { .. }) => api.create_page(&draft).await,
                None => return,
            };
            match result {
                Ok(_) => {
                    notify(&store, ToastLevel::Success, "Page saved.");
                    set_editing.set(None);
                    on_saved.run(());
                }
                Err(err) => report_api_error(&store, err),
            }
        });
    };

    // Flush any pending description write before closing.
    let on_close = move |_: web_sys::MouseEvent| {
        autosave.with_value(|a| a.flush());
        set_editing.set(None);
    };

    let heading = move || match editing.get() {
        Some(PageEditTarget::Edit(_)) => "Edit page",
        Some(PageEditTarget::Create { parent_id: Some(_) }) => "New child page",
        Some(PageEditTarget::Create { parent_id: None }) => "New page",
        None => "",
    };

    let field_error = move |field: &'static str| errors.with(|e| e.get(field).cloned());

    // Rendered HTML for preview
    let rendered_html = move || render_markdown(&description.get());

    view! {
        <Show when=move || editing.get().is_some()>
            <div class="page-editor-column">
                <div class="page-editor-header">
                    <span class="page-editor-title">{heading}</span>
                    <button class="close-btn" on:click=on_close>"×"</button>
                </div>

                <form class="page-editor-form" on:submit=on_submit>
                    <label>
                        "Title"
                        <input
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                        />
                    </label>
                    {move || field_error("title").map(|msg| view! { <p class="field-error">{msg}</p> })}

                    <label>
                        "Slug"
                        <input
                            type="text"
                            placeholder="auto"
                            prop:value=move || slug.get()
                            on:input=move |ev| set_slug.set(event_target_value(&ev))
                        />
                    </label>
                    {move || field_error("slug").map(|msg| view! { <p class="field-error">{msg}</p> })}

                    {move || {
                        matches!(editing.get(), Some(PageEditTarget::Create { .. }))
                            .then(|| {
                                // Options in hierarchy (DFS) order.
                                let options = tree::flatten_all(&tree::build_page_tree(&pages.get()));
                                view! {
                                    <label>
                                        "Parent"
                                        <select on:change=move |ev| {
                                            set_parent_id.set(event_target_value(&ev).parse().ok());
                                        }>
                                            <option value="" selected=move || parent_id.get().is_none()>
                                                "None (top level)"
                                            </option>
                                            {options
                                                .into_iter()
                                                .map(|page| {
                                                    let id = page.id;
                                                    view! {
                                                        <option
                                                            value=id.to_string()
                                                            selected=move || parent_id.get() == Some(id)
                                                        >
                                                            {page.title.clone()}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </label>
                                }
                            })
                    }}

                    <label class="check-label">
                        <input
                            type="checkbox"
                            prop:checked=move || is_published.get()
                            on:change=move |ev| set_is_published.set(event_target_checked(&ev))
                        />
                        "Published"
                    </label>
                    <label class="check-label">
                        <input
                            type="checkbox"
                            prop:checked=move || is_private.get()
                            on:change=move |ev| set_is_private.set(event_target_checked(&ev))
                        />
                        "Private"
                    </label>

                    <div class="description-editor">
                        <div class="edit-pane">
                            <div class="pane-header">"Description"</div>
                            <textarea
                                class="description-textarea"
                                prop:value=move || description.get()
                                on:input=move |ev| {
                                    set_description.set(event_target_value(&ev));
                                    schedule_autosave();
                                }
                                placeholder="Markdown supported..."
                            ></textarea>
                        </div>
                        <div class="preview-pane">
                            <div class="pane-header">"Preview"</div>
                            <div class="preview-content" inner_html=rendered_html></div>
                        </div>
                    </div>

                    <button type="submit" class="save-btn">"Save"</button>
                </form>
            </div>
        </Show>
    }
}
