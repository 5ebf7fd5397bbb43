//! Casedesk Frontend Entry Point

mod api;
mod app;
mod autosave;
mod components;
mod dnd;
mod enrich;
mod markdown;
mod models;
mod store;
mod tree;
mod validate;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
