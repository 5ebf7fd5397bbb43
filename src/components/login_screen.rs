//! Login Screen Component
//!
//! Email/password form; a successful login stores the session and
//! swaps in the dashboard.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::store::{api_for, notify, set_session, use_chrome, ToastLevel};
use crate::validate::{self, FieldErrors};

#[component]
pub fn LoginScreen() -> impl IntoView {
    let store = use_chrome();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut field_errors = FieldErrors::new();
        validate::required(&mut field_errors, "email", &email.get());
        validate::email(&mut field_errors, "email", &email.get());
        validate::required(&mut field_errors, "password", &password.get());
        if !field_errors.is_empty() {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());
        set_submitting.set(true);

        let api = api_for(&store);
        spawn_local(async move {
            match api.login(email.get_untracked().trim(), &password.get_untracked()).await {
                Ok(session) => set_session(&store, session),
                Err(_) => notify(&store, ToastLevel::Error, "Sign-in failed. Check your email and password."),
            }
            set_submitting.set(false);
        });
    };

    let field_error = move |field: &'static str| errors.with(|e| e.get(field).cloned());

    view! {
        <div class="login-screen">
            <form class="login-card" on:submit=on_submit>
                <h1>"Casedesk"</h1>
                <label>
                    "Email"
                    <input
                        type="text"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                {move || field_error("email").map(|msg| view! { <p class="field-error">{msg}</p> })}
                <label>
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                {move || field_error("password").map(|msg| view! { <p class="field-error">{msg}</p> })}
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
