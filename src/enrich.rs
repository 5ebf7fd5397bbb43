//! Relationship Enrichment
//!
//! Best-effort augmentation of people with addresses, marriages, and
//! relationship badges derived from the signed-in user's own family
//! records. A failed sub-fetch degrades that one person to base
//! fields; it never aborts the batch.

use std::collections::HashSet;

use futures::future::join_all;

use crate::api::{ApiClient, ApiError};
use crate::models::{Address, Marriage, MarriageChild, Person};

/// Presentational badge shown next to a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipBadge {
    /// This person record is the signed-in user's own
    LinkedUser,
    Spouse,
    ExSpouse,
    Child,
}

impl RelationshipBadge {
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipBadge::LinkedUser => "You",
            RelationshipBadge::Spouse => "Spouse",
            RelationshipBadge::ExSpouse => "Ex-spouse",
            RelationshipBadge::Child => "Child",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            RelationshipBadge::LinkedUser => "badge badge-you",
            RelationshipBadge::Spouse => "badge badge-spouse",
            RelationshipBadge::ExSpouse => "badge badge-ex",
            RelationshipBadge::Child => "badge badge-child",
        }
    }
}

/// The other party of a marriage, relative to `reference`. `None`
/// when the marriage does not involve the reference person.
pub fn spouse_of(reference: u32, marriage: &Marriage) -> Option<u32> {
    if marriage.person_1_id == reference {
        Some(marriage.person_2_id)
    } else if marriage.person_2_id == reference {
        Some(marriage.person_1_id)
    } else {
        None
    }
}

/// Relationship sets of the signed-in user, derived once per screen
/// load and consulted per person.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelationshipContext {
    pub own_person_id: Option<u32>,
    /// Other-party person id paired with whether that marriage is current
    pub spouses: Vec<(u32, bool)>,
    pub child_ids: HashSet<u32>,
}

impl RelationshipContext {
    pub fn derive(
        own_person_id: Option<u32>,
        marriages: &[Marriage],
        children: &[MarriageChild],
    ) -> Self {
        let Some(me) = own_person_id else {
            return Self::default();
        };
        let spouses = marriages
            .iter()
            .filter_map(|m| spouse_of(me, m).map(|other| (other, m.is_current)))
            .collect();
        let child_ids = children.iter().map(MarriageChild::person_id).collect();
        Self { own_person_id, spouses, child_ids }
    }

    pub fn badges_for(&self, person: &Person) -> Vec<RelationshipBadge> {
        let mut badges = Vec::new();
        if self.own_person_id == Some(person.id) {
            badges.push(RelationshipBadge::LinkedUser);
        }
        if let Some((_, is_current)) = self.spouses.iter().find(|(id, _)| *id == person.id) {
            badges.push(if *is_current {
                RelationshipBadge::Spouse
            } else {
                RelationshipBadge::ExSpouse
            });
        }
        if self.child_ids.contains(&person.id) {
            badges.push(RelationshipBadge::Child);
        }
        badges
    }
}

/// A person plus whatever enrichment succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPerson {
    pub person: Person,
    pub addresses: Vec<Address>,
    pub marriages: Vec<Marriage>,
    pub badges: Vec<RelationshipBadge>,
}

/// Combine a person with the outcomes of its sub-fetches. Failures
/// degrade to empty enrichment fields.
fn combine(
    person: Person,
    addresses: Result<Vec<Address>, ApiError>,
    marriages: Result<Vec<Marriage>, ApiError>,
    rel: &RelationshipContext,
) -> EnrichedPerson {
    let badges = rel.badges_for(&person);
    EnrichedPerson {
        addresses: addresses.unwrap_or_default(),
        marriages: marriages.unwrap_or_default(),
        badges,
        person,
    }
}

async fn enrich_person(api: &ApiClient, person: Person, rel: &RelationshipContext) -> EnrichedPerson {
    let (addresses, marriages) = futures::join!(
        api.list_person_addresses(person.id),
        api.list_person_marriages(person.id),
    );
    combine(person, addresses, marriages, rel)
}

/// Fan out address and marriage fetches for every person in the
/// batch. Each person is enriched independently.
pub async fn enrich_people(
    api: &ApiClient,
    people: Vec<Person>,
    rel: &RelationshipContext,
) -> Vec<EnrichedPerson> {
    join_all(people.into_iter().map(|p| enrich_person(api, p, rel))).await
}

/// Load the signed-in user's marriages and their children, then
/// derive the relationship sets. Any failure collapses to an empty
/// context; badges simply do not render.
pub async fn load_relationship_context(
    api: &ApiClient,
    own_person_id: Option<u32>,
) -> RelationshipContext {
    let Some(me) = own_person_id else {
        return RelationshipContext::default();
    };
    let Ok(marriages) = api.list_person_marriages(me).await else {
        return RelationshipContext { own_person_id, ..Default::default() };
    };
    let children_lists = join_all(
        marriages.iter().map(|m| api.list_marriage_children(m.id)),
    )
    .await;
    let children: Vec<MarriageChild> = children_lists
        .into_iter()
        .filter_map(Result::ok)
        .flatten()
        .collect();
    RelationshipContext::derive(own_person_id, &marriages, &children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_person(id: u32) -> Person {
        Person {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            email: None,
            phone: None,
            company_id: None,
            user_id: None,
            notes: None,
        }
    }

    fn make_marriage(id: u32, a: u32, b: u32, is_current: bool) -> Marriage {
        Marriage { id, person_1_id: a, person_2_id: b, is_current }
    }

    #[test]
    fn test_spouse_of_either_orientation() {
        let m = make_marriage(1, 10, 20, true);
        assert_eq!(spouse_of(10, &m), Some(20));
        assert_eq!(spouse_of(20, &m), Some(10));
        assert_eq!(spouse_of(30, &m), None);
    }

    #[test]
    fn test_child_id_falls_back_to_row_id() {
        let with_ref = MarriageChild { id: 5, marriage_id: 1, child_id: Some(42) };
        let legacy = MarriageChild { id: 6, marriage_id: 1, child_id: None };
        assert_eq!(with_ref.person_id(), 42);
        assert_eq!(legacy.person_id(), 6);
    }

    #[test]
    fn test_derive_collects_spouses_and_children() {
        let marriages = vec![
            make_marriage(1, 10, 20, false),
            make_marriage(2, 30, 10, true),
            // Not the reference person's marriage at all
            make_marriage(3, 40, 50, true),
        ];
        let children = vec![
            MarriageChild { id: 1, marriage_id: 1, child_id: Some(60) },
            MarriageChild { id: 61, marriage_id: 2, child_id: None },
        ];
        let rel = RelationshipContext::derive(Some(10), &marriages, &children);

        assert_eq!(rel.spouses, vec![(20, false), (30, true)]);
        assert!(rel.child_ids.contains(&60));
        assert!(rel.child_ids.contains(&61));
    }

    #[test]
    fn test_badges_for() {
        let marriages = vec![make_marriage(1, 10, 20, false), make_marriage(2, 10, 30, true)];
        let children = vec![MarriageChild { id: 1, marriage_id: 1, child_id: Some(60) }];
        let rel = RelationshipContext::derive(Some(10), &marriages, &children);

        assert_eq!(rel.badges_for(&make_person(10)), vec![RelationshipBadge::LinkedUser]);
        assert_eq!(rel.badges_for(&make_person(20)), vec![RelationshipBadge::ExSpouse]);
        assert_eq!(rel.badges_for(&make_person(30)), vec![RelationshipBadge::Spouse]);
        assert_eq!(rel.badges_for(&make_person(60)), vec![RelationshipBadge::Child]);
        assert_eq!(rel.badges_for(&make_person(99)), Vec::new());
    }

    #[test]
    fn test_no_session_person_yields_empty_context() {
        let marriages = vec![make_marriage(1, 10, 20, true)];
        let rel = RelationshipContext::derive(None, &marriages, &[]);
        assert_eq!(rel, RelationshipContext::default());
    }

    #[test]
    fn test_failed_sub_fetch_degrades_to_base_fields() {
        let rel = RelationshipContext::default();
        let address = Address {
            id: 1,
            person_id: 20,
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: None,
            postal_code: None,
            country: None,
        };

        // Person A: both sub-fetches failed. Person B: both succeeded.
        let a = combine(make_person(10), Err(ApiError::Network), Err(ApiError::Status(500)), &rel);
        let b = combine(
            make_person(20),
            Ok(vec![address.clone()]),
            Ok(vec![make_marriage(1, 20, 30, true)]),
            &rel,
        );

        assert!(a.addresses.is_empty());
        assert!(a.marriages.is_empty());
        assert_eq!(a.person.id, 10);
        assert_eq!(b.addresses, vec![address]);
        assert_eq!(b.marriages.len(), 1);
    }
}
