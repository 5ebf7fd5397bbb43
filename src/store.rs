//! Global Chrome State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity on the
//! cross-cutting UI state: session, theme, toasts, breadcrumbs.
//! Screen data stays in signals owned by each screen.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{ApiClient, ApiError};
use crate::models::Session;

/// How long a toast stays on screen.
const TOAST_DISMISS_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn class(&self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    pub fn class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast toast-info",
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub level: ToastLevel,
    pub message: String,
}

/// One breadcrumb segment, leftmost first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
}

/// Cross-cutting chrome state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ChromeState {
    /// Backend base URL, fixed at startup
    pub api_base: String,
    pub session: Option<Session>,
    pub theme: Theme,
    pub toasts: Vec<Toast>,
    pub breadcrumbs: Vec<Crumb>,
    pub next_toast_id: u32,
}

impl ChromeState {
    pub fn new(api_base: String) -> Self {
        Self { api_base, ..Default::default() }
    }
}

/// Type alias for the store
pub type ChromeStore = Store<ChromeState>;

/// Get the chrome store from context
pub fn use_chrome() -> ChromeStore {
    expect_context::<ChromeStore>()
}

/// An API client carrying the current session token, if any.
pub fn api_for(store: &ChromeStore) -> ApiClient {
    let client = ApiClient::new(store.api_base().get_untracked());
    let token = store
        .session()
        .with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
    match token {
        Some(token) => client.with_token(token),
        None => client,
    }
}

// ========================
// Store Helper Functions
// ========================

/// Push a toast and schedule its dismissal.
pub fn notify(store: &ChromeStore, level: ToastLevel, message: impl Into<String>) {
    let id = {
        let next_toast_id = store.next_toast_id();
        let mut next = next_toast_id.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast { id, level, message: message.into() });

    let store = *store;
    Timeout::new(TOAST_DISMISS_MS, move || {
        dismiss_toast(&store, id);
    })
    .forget();
}

pub fn dismiss_toast(store: &ChromeStore, id: u32) {
    store.toasts().write().retain(|t| t.id != id);
}

/// Surface an API failure. 401 clears the session, which drops the
/// UI back to the login screen.
pub fn report_api_error(store: &ChromeStore, err: ApiError) {
    web_sys::console::warn_1(&format!("[API] {}", err).into());
    if err == ApiError::Unauthorized {
        store.session().set(None);
    }
    notify(store, ToastLevel::Error, err.to_string());
}

pub fn set_breadcrumbs(store: &ChromeStore, labels: &[&str]) {
    store
        .breadcrumbs()
        .set(labels.iter().map(|l| Crumb { label: l.to_string() }).collect());
}

pub fn set_session(store: &ChromeStore, session: Session) {
    store.session().set(Some(session));
}

pub fn clear_session(store: &ChromeStore) {
    store.session().set(None);
}

pub fn toggle_theme(store: &ChromeStore) {
    let next = store.theme().get_untracked().toggled();
    store.theme().set(next);
}
