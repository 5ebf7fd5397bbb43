//! Companies Screen
//!
//! Contact table for companies with an inline edit column.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::CompanyDraft;
use crate::components::DeleteConfirmButton;
use crate::models::Company;
use crate::store::{api_for, notify, report_api_error, set_breadcrumbs, use_chrome, ToastLevel};
use crate::validate::{self, FieldErrors};

const NAME_MAX: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CompanyEditTarget {
    Create,
    Edit(u32),
}

#[component]
pub fn CompaniesScreen() -> impl IntoView {
    let store = use_chrome();

    let (companies, set_companies) = signal(Vec::<Company>::new());
    let (editing, set_editing) = signal::<Option<CompanyEditTarget>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let (name, set_name) = signal(String::new());
    let (website, set_website) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (last_target, set_last_target) = signal::<Option<CompanyEditTarget>>(None);

    Effect::new(move |_| {
        set_breadcrumbs(&store, &["Casedesk", "Contacts", "Companies"]);
    });

    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            let api = api_for(&store);
            match api.list_companies().await {
                Ok(loaded) => set_companies.set(loaded),
                Err(err) => report_api_error(&store, err),
            }
        });
    });

    // Load form fields when the target changes
    Effect::new(move |_| {
        let target = editing.get();
        if target == last_target.get() {
            return;
        }
        set_last_target.set(target);
        set_errors.set(FieldErrors::new());

        let company = match target {
            Some(CompanyEditTarget::Edit(id)) => {
                companies.with(|cs| cs.iter().find(|c| c.id == id).cloned())
            }
            _ => None,
        };
        match company {
            Some(c) => {
                set_name.set(c.name);
                set_website.set(c.website.unwrap_or_default());
                set_phone.set(c.phone.unwrap_or_default());
            }
            None => {
                set_name.set(String::new());
                set_website.set(String::new());
                set_phone.set(String::new());
            }
        }
    });

    let reload = move || set_reload_trigger.update(|v| *v += 1);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut field_errors = FieldErrors::new();
        validate::required(&mut field_errors, "name", &name.get_untracked());
        validate::max_len(&mut field_errors, "name", &name.get_untracked(), NAME_MAX);
        if !field_errors.is_empty() {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());

        let website_value = website.get_untracked().trim().to_string();
        let phone_value = phone.get_untracked().trim().to_string();
        let draft = CompanyDraft {
            name: name.get_untracked().trim().to_string(),
            website: (!website_value.is_empty()).then_some(website_value),
            phone: (!phone_value.is_empty()).then_some(phone_value),
            notes: None,
        };
        let target = editing.get_untracked();
        spawn_local(async move {
            let api = api_for(&store);
            let result = match target {
                Some(CompanyEditTarget::Edit(id)) => api.update_company(id, &draft).await,
                Some(CompanyEditTarget::Create) => api.create_company(&draft).await,
                None => return,
            };
            match result {
                Ok(_) => {
                    notify(&store, ToastLevel::Success, "Company saved.");
                    set_editing.set(None);
                    reload();
                }
                Err(err) => report_api_error(&store, err),
            }
        });
    };

    let field_error = move |field: &'static str| errors.with(|e| e.get(field).cloned());

    view! {
        <div class="companies-screen">
            <div class="companies-main">
                <div class="companies-toolbar">
                    <button
                        class="new-company-btn"
                        on:click=move |_| set_editing.set(Some(CompanyEditTarget::Create))
                    >
                        "New company"
                    </button>
                </div>

                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Website"</th>
                            <th>"Phone"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || companies.get()
                            key=|company| company.id
                            children=move |company| {
                                let id = company.id;
                                let on_delete = Callback::new(move |_: ()| {
                                    spawn_local(async move {
                                        let api = api_for(&store);
                                        match api.delete_company(id).await {
                                            Ok(()) => {
                                                notify(&store, ToastLevel::Success, "Company deleted.");
                                                set_reload_trigger.update(|v| *v += 1);
                                            }
                                            Err(err) => report_api_error(&store, err),
                                        }
                                    });
                                });
                                view! {
                                    <tr>
                                        <td>{company.name.clone()}</td>
                                        <td>{company.website.clone().unwrap_or_default()}</td>
                                        <td>{company.phone.clone().unwrap_or_default()}</td>
                                        <td class="row-actions">
                                            <button
                                                class="edit-btn"
                                                on:click=move |_| set_editing.set(Some(CompanyEditTarget::Edit(id)))
                                            >
                                                "Edit"
                                            </button>
                                            <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete/>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <p class="item-count">{move || format!("{} companies", companies.get().len())}</p>
            </div>

            <Show when=move || editing.get().is_some()>
                <div class="side-form-column">
                    <div class="side-form-header">
                        <span class="side-form-title">
                            {move || match editing.get() {
                                Some(CompanyEditTarget::Edit(_)) => "Edit company",
                                _ => "New company",
                            }}
                        </span>
                        <button class="close-btn" on:click=move |_| set_editing.set(None)>"×"</button>
                    </div>
                    <form class="side-form" on:submit=on_submit>
                        <label>
                            "Name"
                            <input
                                type="text"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </label>
                        {move || field_error("name").map(|msg| view! { <p class="field-error">{msg}</p> })}
                        <label>
                            "Website"
                            <input
                                type="text"
                                prop:value=move || website.get()
                                on:input=move |ev| set_website.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Phone"
                            <input
                                type="text"
                                prop:value=move || phone.get()
                                on:input=move |ev| set_phone.set(event_target_value(&ev))
                            />
                        </label>
                        <button type="submit" class="save-btn">"Save"</button>
                    </form>
                </div>
            </Show>
        </div>
    }
}
