//! People Screen
//!
//! Contact table for people, enriched per row with addresses,
//! marriages, and relationship badges relative to the signed-in
//! user. Enrichment is best-effort; a row whose sub-fetches fail
//! still renders its base fields.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::person_form::{PersonEditTarget, PersonForm};
use crate::components::DeleteConfirmButton;
use crate::enrich::{self, EnrichedPerson};
use crate::models::Company;
use crate::store::{
    api_for, notify, report_api_error, set_breadcrumbs, use_chrome, ChromeStateStoreFields,
    ToastLevel,
};

#[component]
pub fn PeopleScreen() -> impl IntoView {
    let store = use_chrome();

    let (people, set_people) = signal(Vec::<EnrichedPerson>::new());
    let (companies, set_companies) = signal(Vec::<Company>::new());
    let (query, set_query) = signal(String::new());
    let (editing, set_editing) = signal::<Option<PersonEditTarget>>(None);
    let (loading, set_loading) = signal(false);
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    Effect::new(move |_| {
        set_breadcrumbs(&store, &["Casedesk", "Contacts", "People"]);
    });

    // Load and enrich on mount, on search, and after every mutation
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        let search = query.get();
        set_loading.set(true);
        spawn_local(async move {
            let api = api_for(&store);
            let own_person_id = store
                .session()
                .with_untracked(|s| s.as_ref().and_then(|s| s.user.person_id));

            match api.list_people(Some(&search)).await {
                Ok(base) => {
                    let rel = enrich::load_relationship_context(&api, own_person_id).await;
                    let enriched = enrich::enrich_people(&api, base, &rel).await;
                    set_people.set(enriched);
                }
                Err(err) => report_api_error(&store, err),
            }
            if let Ok(loaded) = api.list_companies().await {
                set_companies.set(loaded);
            }
            set_loading.set(false);
        });
    });

    let reload = Callback::new(move |_: ()| {
        set_reload_trigger.update(|v| *v += 1);
    });

    let company_name = move |company_id: Option<u32>| {
        company_id.and_then(|id| {
            companies.with(|cs| cs.iter().find(|c| c.id == id).map(|c| c.name.clone()))
        })
    };

    view! {
        <div class="people-screen">
            <div class="people-main">
                <div class="people-toolbar">
                    <input
                        type="search"
                        placeholder="Search people..."
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <button
                        class="new-person-btn"
                        on:click=move |_| set_editing.set(Some(PersonEditTarget::Create))
                    >
                        "New person"
                    </button>
                </div>

                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Phone"</th>
                            <th>"Company"</th>
                            <th>"Addresses"</th>
                            <th>"Marriages"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || people.get()
                            key=|row| row.person.id
                            children=move |row| {
                                let id = row.person.id;
                                let on_delete = Callback::new(move |_: ()| {
                                    spawn_local(async move {
                                        let api = api_for(&store);
                                        match api.delete_person(id).await {
                                            Ok(()) => {
                                                notify(&store, ToastLevel::Success, "Person deleted.");
                                                reload.run(());
                                            }
                                            Err(err) => report_api_error(&store, err),
                                        }
                                    });
                                });
                                let badges = row.badges.clone();
                                view! {
                                    <tr>
                                        <td>
                                            {row.person.full_name()}
                                            {badges
                                                .into_iter()
                                                .map(|b| view! { <span class=b.class()>{b.label()}</span> })
                                                .collect_view()}
                                        </td>
                                        <td>{row.person.email.clone().unwrap_or_default()}</td>
                                        <td>{row.person.phone.clone().unwrap_or_default()}</td>
                                        <td>{company_name(row.person.company_id).unwrap_or_default()}</td>
                                        <td>{row.addresses.len()}</td>
                                        <td>{row.marriages.len()}</td>
                                        <td class="row-actions">
                                            <button
                                                class="edit-btn"
                                                on:click=move |_| set_editing.set(Some(PersonEditTarget::Edit(id)))
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

                <p class="item-count">
                    {move || {
                        if loading.get() {
                            "Loading...".to_string()
                        } else {
                            format!("{} people", people.get().len())
                        }
                    }}
                </p>
            </div>

            <PersonForm
                editing=editing
                set_editing=set_editing
                people=people
                companies=companies
                on_saved=reload
            />
        </div>
    }
}
