//! Person Form Component
//!
//! Side column for creating or editing a person.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PersonDraft;
use crate::enrich::EnrichedPerson;
use crate::models::Company;
use crate::store::{api_for, notify, report_api_error, use_chrome, ToastLevel};
use crate::validate::{self, FieldErrors};

const NAME_MAX: usize = 100;
const NOTES_MAX: usize = 2_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonEditTarget {
    Create,
    Edit(u32),
}

#[component]
pub fn PersonForm(
    editing: ReadSignal<Option<PersonEditTarget>>,
    set_editing: WriteSignal<Option<PersonEditTarget>>,
    people: ReadSignal<Vec<EnrichedPerson>>,
    companies: ReadSignal<Vec<Company>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let store = use_chrome();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (company_id, set_company_id) = signal::<Option<u32>>(None);
    let (notes, set_notes) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());

    let (last_target, set_last_target) = signal::<Option<PersonEditTarget>>(None);

    // Load fields when the editing target changes
    Effect::new(move |_| {
        let target = editing.get();
        if target == last_target.get() {
            return;
        }
        set_last_target.set(target);
        set_errors.set(FieldErrors::new());

        let person = match target {
            Some(PersonEditTarget::Edit(id)) => {
                people.with(|rows| rows.iter().find(|r| r.person.id == id).map(|r| r.person.clone()))
            }
            _ => None,
        };
        match person {
            Some(p) => {
                set_first_name.set(p.first_name);
                set_last_name.set(p.last_name);
                set_email.set(p.email.unwrap_or_default());
                set_phone.set(p.phone.unwrap_or_default());
                set_company_id.set(p.company_id);
                set_notes.set(p.notes.unwrap_or_default());
            }
            None => {
                set_first_name.set(String::new());
                set_last_name.set(String::new());
                set_email.set(String::new());
                set_phone.set(String::new());
                set_company_id.set(None);
                set_notes.set(String::new());
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut field_errors = FieldErrors::new();
        validate::required(&mut field_errors, "first_name", &first_name.get_untracked());
        validate::max_len(&mut field_errors, "first_name", &first_name.get_untracked(), NAME_MAX);
        validate::required(&mut field_errors, "last_name", &last_name.get_untracked());
        validate::max_len(&mut field_errors, "last_name", &last_name.get_untracked(), NAME_MAX);
        validate::email(&mut field_errors, "email", &email.get_untracked());
        validate::max_len(&mut field_errors, "notes", &notes.get_untracked(), NOTES_MAX);
        if !field_errors.is_empty() {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());

        let email_value = email.get_untracked().trim().to_string();
        let phone_value = phone.get_untracked().trim().to_string();
        let notes_value = notes.get_untracked().trim().to_string();
        let draft = PersonDraft {
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
            email: (!email_value.is_empty()).then_some(email_value),
            phone: (!phone_value.is_empty()).then_some(phone_value),
            company_id: company_id.get_untracked(),
            notes: (!notes_value.is_empty()).then_some(notes_value),
        };
        let target = editing.get_untracked();
        spawn_local(async move {
            let api = api_for(&store);
            let result = match target {
                Some(PersonEditTarget::Edit(id)) => api.update_person(id, &draft).await,
                Some(PersonEditTarget::Create) => api.create_person(&draft).await,
                None => return,
            };
            match result {
                Ok(_) => {
                    notify(&store, ToastLevel::Success, "Person saved.");
                    set_editing.set(None);
                    on_saved.run(());
                }
                Err(err) => report_api_error(&store, err),
            }
        });
    };

    let heading = move || match editing.get() {
        Some(PersonEditTarget::Edit(_)) => "Edit person",
        Some(PersonEditTarget::Create) => "New person",
        None => "",
    };

    let field_error = move |field: &'static str| errors.with(|e| e.get(field).cloned());

    view! {
        <Show when=move || editing.get().is_some()>
            <div class="side-form-column">
                <div class="side-form-header">
                    <span class="side-form-title">{heading}</span>
                    <button class="close-btn" on:click=move |_| set_editing.set(None)>"×"</button>
                </div>

                <form class="side-form" on:submit=on_submit>
                    <label>
                        "First name"
                        <input
                            type="text"
                            prop:value=move || first_name.get()
                            on:input=move |ev| set_first_name.set(event_target_value(&ev))
                        />
                    </label>
                    {move || field_error("first_name").map(|msg| view! { <p class="field-error">{msg}</p> })}

                    <label>
                        "Last name"
                        <input
                            type="text"
                            prop:value=move || last_name.get()
                            on:input=move |ev| set_last_name.set(event_target_value(&ev))
                        />
                    </label>
                    {move || field_error("last_name").map(|msg| view! { <p class="field-error">{msg}</p> })}

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
                        "Phone"
                        <input
                            type="text"
                            prop:value=move || phone.get()
                            on:input=move |ev| set_phone.set(event_target_value(&ev))
                        />
                    </label>

                    <label>
                        "Company"
                        <select on:change=move |ev| {
                            set_company_id.set(event_target_value(&ev).parse().ok());
                        }>
                            <option value="" selected=move || company_id.get().is_none()>
                                "None"
                            </option>
                            <For
                                each=move || companies.get()
                                key=|company| company.id
                                children=move |company| {
                                    let id = company.id;
                                    view! {
                                        <option
                                            value=id.to_string()
                                            selected=move || company_id.get() == Some(id)
                                        >
                                            {company.name.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </label>

                    <label>
                        "Notes"
                        <textarea
                            prop:value=move || notes.get()
                            on:input=move |ev| set_notes.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    {move || field_error("notes").map(|msg| view! { <p class="field-error">{msg}</p> })}

                    <button type="submit" class="save-btn">"Save"</button>
                </form>
            </div>
        </Show>
    }
}
