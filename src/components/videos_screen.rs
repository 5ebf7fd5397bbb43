//! Videos Screen
//!
//! Video-asset manager: card grid with publish state and an inline
//! side form for create/edit.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::VideoDraft;
use crate::components::DeleteConfirmButton;
use crate::models::Video;
use crate::store::{api_for, notify, report_api_error, set_breadcrumbs, use_chrome, ToastLevel};
use crate::validate::{self, FieldErrors};

const TITLE_MAX: usize = 200;

/// "m:ss" display for a duration in seconds
fn format_duration(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => "—".to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VideoEditTarget {
    Create,
    Edit(u32),
}

#[component]
pub fn VideosScreen() -> impl IntoView {
    let store = use_chrome();

    let (videos, set_videos) = signal(Vec::<Video>::new());
    let (editing, set_editing) = signal::<Option<VideoEditTarget>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let (title, set_title) = signal(String::new());
    let (url, set_url) = signal(String::new());
    let (duration, set_duration) = signal(String::new());
    let (is_published, set_is_published) = signal(false);
    let (errors, set_errors) = signal(FieldErrors::new());
    let (last_target, set_last_target) = signal::<Option<VideoEditTarget>>(None);

    Effect::new(move |_| {
        set_breadcrumbs(&store, &["Casedesk", "Videos"]);
    });

    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            let api = api_for(&store);
            match api.list_videos().await {
                Ok(loaded) => set_videos.set(loaded),
                Err(err) => report_api_error(&store, err),
            }
        });
    });

    Effect::new(move |_| {
        let target = editing.get();
        if target == last_target.get() {
            return;
        }
        set_last_target.set(target);
        set_errors.set(FieldErrors::new());

        let video = match target {
            Some(VideoEditTarget::Edit(id)) => {
                videos.with(|vs| vs.iter().find(|v| v.id == id).cloned())
            }
            _ => None,
        };
        match video {
            Some(v) => {
                set_title.set(v.title);
                set_url.set(v.url);
                set_duration.set(v.duration_seconds.map(|d| d.to_string()).unwrap_or_default());
                set_is_published.set(v.is_published);
            }
            None => {
                set_title.set(String::new());
                set_url.set(String::new());
                set_duration.set(String::new());
                set_is_published.set(false);
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut field_errors = FieldErrors::new();
        validate::required(&mut field_errors, "title", &title.get_untracked());
        validate::max_len(&mut field_errors, "title", &title.get_untracked(), TITLE_MAX);
        validate::required(&mut field_errors, "url", &url.get_untracked());
        if !duration.get_untracked().trim().is_empty()
            && duration.get_untracked().trim().parse::<u32>().is_err()
        {
            field_errors.insert("duration", "Enter a whole number of seconds".to_string());
        }
        if !field_errors.is_empty() {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());

        let draft = VideoDraft {
            title: title.get_untracked().trim().to_string(),
            description: None,
            url: url.get_untracked().trim().to_string(),
            thumbnail_url: None,
            duration_seconds: duration.get_untracked().trim().parse().ok(),
            is_published: is_published.get_untracked(),
        };
        let target = editing.get_untracked();
        spawn_local(async move {
            let api = api_for(&store);
            let result = match target {
                Some(VideoEditTarget::Edit(id)) => api.update_video(id, &draft).await,
                Some(VideoEditTarget::Create) => api.create_video(&draft).await,
                None => return,
            };
            match result {
                Ok(_) => {
                    notify(&store, ToastLevel::Success, "Video saved.");
                    set_editing.set(None);
                    set_reload_trigger.update(|v| *v += 1);
                }
                Err(err) => report_api_error(&store, err),
            }
        });
    };

    let field_error = move |field: &'static str| errors.with(|e| e.get(field).cloned());

    view! {
        <div class="videos-screen">
            <div class="videos-main">
                <div class="videos-toolbar">
                    <button
                        class="new-video-btn"
                        on:click=move |_| set_editing.set(Some(VideoEditTarget::Create))
                    >
                        "New video"
                    </button>
                </div>

                <div class="video-grid">
                    <For
                        each=move || videos.get()
                        key=|video| video.id
                        children=move |video| {
                            let id = video.id;
                            let on_delete = Callback::new(move |_: ()| {
                                spawn_local(async move {
                                    let api = api_for(&store);
                                    match api.delete_video(id).await {
                                        Ok(()) => {
                                            notify(&store, ToastLevel::Success, "Video deleted.");
                                            set_reload_trigger.update(|v| *v += 1);
                                        }
                                        Err(err) => report_api_error(&store, err),
                                    }
                                });
                            });
                            view! {
                                <div class="video-card">
                                    <div class="video-card-title">{video.title.clone()}</div>
                                    <div class="video-card-meta">
                                        <span>{format_duration(video.duration_seconds)}</span>
                                        <span class=if video.is_published { "page-flag" } else { "page-flag draft" }>
                                            {if video.is_published { "published" } else { "draft" }}
                                        </span>
                                    </div>
                                    <div class="video-card-url">{video.url.clone()}</div>
                                    <div class="row-actions">
                                        <button
                                            class="edit-btn"
                                            on:click=move |_| set_editing.set(Some(VideoEditTarget::Edit(id)))
                                        >
                                            "Edit"
                                        </button>
                                        <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete/>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>

                <p class="item-count">{move || format!("{} videos", videos.get().len())}</p>
            </div>

            <Show when=move || editing.get().is_some()>
                <div class="side-form-column">
                    <div class="side-form-header">
                        <span class="side-form-title">
                            {move || match editing.get() {
                                Some(VideoEditTarget::Edit(_)) => "Edit video",
                                _ => "New video",
                            }}
                        </span>
                        <button class="close-btn" on:click=move |_| set_editing.set(None)>"×"</button>
                    </div>
                    <form class="side-form" on:submit=on_submit>
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
                            "URL"
                            <input
                                type="text"
                                prop:value=move || url.get()
                                on:input=move |ev| set_url.set(event_target_value(&ev))
                            />
                        </label>
                        {move || field_error("url").map(|msg| view! { <p class="field-error">{msg}</p> })}
                        <label>
                            "Duration (seconds)"
                            <input
                                type="text"
                                prop:value=move || duration.get()
                                on:input=move |ev| set_duration.set(event_target_value(&ev))
                            />
                        </label>
                        {move || field_error("duration").map(|msg| view! { <p class="field-error">{msg}</p> })}
                        <label class="check-label">
                            <input
                                type="checkbox"
                                prop:checked=move || is_published.get()
                                on:change=move |ev| set_is_published.set(event_target_checked(&ev))
                            />
                            "Published"
                        </label>
                        <button type="submit" class="save-btn">"Save"</button>
                    </form>
                </div>
            </Show>
        </div>
    }
}
