//! Profile Screen
//!
//! The signed-in user's account, linked person record, addresses,
//! and family relationships. Everything here is read-only; edits go
//! through the People screen.

use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::enrich::spouse_of;
use crate::models::{Address, Person};
use crate::store::{api_for, set_breadcrumbs, use_chrome, ChromeStateStoreFields};

/// Resolved relationship data for the profile view.
#[derive(Clone, Debug, PartialEq, Default)]
struct ProfileData {
    person: Option<Person>,
    addresses: Vec<Address>,
    /// Spouse paired with whether the marriage is current
    spouses: Vec<(Person, bool)>,
    children: Vec<Person>,
}

async fn load_profile(api: &ApiClient, person_id: u32) -> ProfileData {
    let (person, addresses, marriages) = futures::join!(
        api.get_person(person_id),
        api.list_person_addresses(person_id),
        api.list_person_marriages(person_id),
    );
    let marriages = marriages.unwrap_or_default();

    // Resolve the other party of each marriage, best-effort.
    let spouse_fetches = marriages
        .iter()
        .filter_map(|m| spouse_of(person_id, m).map(|other| (other, m.is_current)))
        .map(|(other, is_current)| async move {
            api.get_person(other).await.ok().map(|p| (p, is_current))
        });
    let spouses: Vec<(Person, bool)> = join_all(spouse_fetches).await.into_iter().flatten().collect();

    // Children across all marriages, resolved to person records.
    let child_lists = join_all(marriages.iter().map(|m| api.list_marriage_children(m.id))).await;
    let child_fetches = child_lists
        .into_iter()
        .filter_map(Result::ok)
        .flatten()
        .map(|child| async move { api.get_person(child.person_id()).await.ok() });
    let children: Vec<Person> = join_all(child_fetches).await.into_iter().flatten().collect();

    ProfileData {
        person: person.ok(),
        addresses: addresses.unwrap_or_default(),
        spouses,
        children,
    }
}

#[component]
pub fn ProfileScreen() -> impl IntoView {
    let store = use_chrome();

    let (profile, set_profile) = signal(ProfileData::default());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        set_breadcrumbs(&store, &["Casedesk", "Profile"]);
    });

    // Untracked read: the session write below must not re-run this.
    Effect::new(move |_| {
        let person_id = store
            .session()
            .with_untracked(|s| s.as_ref().and_then(|s| s.user.person_id));
        spawn_local(async move {
            let api = api_for(&store);
            // Pick up account changes made since sign-in.
            if let Ok(user) = api.current_user().await {
                store.session().update(|s| {
                    if let Some(session) = s {
                        session.user = user;
                    }
                });
            }
            if let Some(person_id) = person_id {
                set_profile.set(load_profile(&api, person_id).await);
            }
            set_loading.set(false);
        });
    });

    let account = move || store.session().with(|s| s.as_ref().map(|s| s.user.clone()));

    view! {
        <div class="profile-screen">
            <h1>"Profile"</h1>

            {move || {
                account()
                    .map(|user| {
                        view! {
                            <section class="profile-section">
                                <h2>"Account"</h2>
                                <p>{user.display_name.clone()}</p>
                                <p class="muted">{user.email.clone()}</p>
                            </section>
                        }
                    })
            }}

            {move || {
                if loading.get() {
                    return view! { <p class="muted">"Loading..."</p> }.into_any();
                }
                let data = profile.get();
                let Some(person) = data.person else {
                    return view! { <p class="muted">"No person record is linked to this account."</p> }
                        .into_any();
                };
                view! {
                    <section class="profile-section">
                        <h2>"Linked person"</h2>
                        <p>{person.full_name()}</p>
                        <p class="muted">{person.email.clone().unwrap_or_default()}</p>
                    </section>

                    <section class="profile-section">
                        <h2>"Addresses"</h2>
                        {if data.addresses.is_empty() {
                            view! { <p class="muted">"None on file."</p> }.into_any()
                        } else {
                            data.addresses
                                .iter()
                                .map(|a| {
                                    view! {
                                        <p>{format!("{}, {}", a.street, a.city)}</p>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </section>

                    <section class="profile-section">
                        <h2>"Family"</h2>
                        {data.spouses
                            .iter()
                            .map(|(spouse, is_current)| {
                                let badge = if *is_current { "Spouse" } else { "Ex-spouse" };
                                view! {
                                    <p>
                                        {spouse.full_name()}
                                        <span class="badge">{badge}</span>
                                    </p>
                                }
                            })
                            .collect_view()}
                        {data.children
                            .iter()
                            .map(|child| {
                                view! {
                                    <p>
                                        {child.full_name()}
                                        <span class="badge badge-child">"Child"</span>
                                    </p>
                                }
                            })
                            .collect_view()}
                        {(data.spouses.is_empty() && data.children.is_empty())
                            .then(|| view! { <p class="muted">"No relationships recorded."</p> })}
                    </section>
                }
                .into_any()
            }}
        </div>
    }
}
