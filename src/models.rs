//! Frontend Models
//!
//! Data structures matching backend API schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The immutable home page. Never deleted, re-parented, or dragged.
pub const HOME_PAGE_ID: u32 = 1;

/// CMS page record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: u32,
    pub title: String,
    pub description: Option<String>,
    pub parent_id: Option<u32>,
    pub is_published: bool,
    pub is_private: bool,
    pub slug: Option<String>,
    pub url_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Page {
    pub fn is_home(&self) -> bool {
        self.id == HOME_PAGE_ID
    }
}

/// A page plus its resolved children. Built fresh from the flat
/// list on every load; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTreeNode {
    pub page: Page,
    pub children: Vec<PageTreeNode>,
    pub is_expanded: bool,
}

/// Contact: a person (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<u32>,
    /// Backend user account linked to this person, if any
    pub user_id: Option<u32>,
    pub notes: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Contact: a company (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: u32,
    pub name: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Postal address attached to a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: u32,
    pub person_id: u32,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Marriage record linking two people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marriage {
    pub id: u32,
    pub person_1_id: u32,
    pub person_2_id: u32,
    pub is_current: bool,
}

/// Child record attached to a marriage. Older backend rows carry the
/// person reference in `id` rather than `child_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarriageChild {
    pub id: u32,
    pub marriage_id: u32,
    #[serde(default)]
    pub child_id: Option<u32>,
}

impl MarriageChild {
    /// The referenced person, tolerating the legacy row shape.
    pub fn person_id(&self) -> u32 {
        self.child_id.unwrap_or(self.id)
    }
}

/// Video asset record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: u32,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: Option<u32>,
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Authenticated user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    pub display_name: String,
    /// The person record representing this user, if linked
    pub person_id: Option<u32>,
}

/// Bearer token plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}
