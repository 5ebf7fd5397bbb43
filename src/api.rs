//! Backend API Client
//!
//! Typed wrappers over the litigation-support REST API. Every
//! authenticated call carries the session bearer token; responses
//! are decoded JSON matching the backend schemas. Statuses are not
//! interpreted beyond success/failure, except 401 which forces
//! re-login. No retry or backoff anywhere.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    Address, Company, Marriage, MarriageChild, Page, Person, Session, User, Video,
};

/// Versioned prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("could not reach the server")]
    Network,
    #[error("the server rejected the request (status {0})")]
    Status(u16),
    #[error("your session has expired")]
    Unauthorized,
    #[error("the server sent an unexpected response")]
    Decode,
}

/// Cheaply cloneable handle to the backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// A copy of this client that authenticates as `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), API_PREFIX, path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        match resp.status() {
            status if status.is_success() => resp.json().await.map_err(|_| ApiError::Decode),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => Err(ApiError::Status(status.as_u16())),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        Self::decode(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.post(self.url(path)).json(body))
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        Self::decode(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.put(self.url(path)).json(body))
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        Self::decode(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self
            .authed(self.http.delete(self.url(path)))
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => Err(ApiError::Status(status.as_u16())),
        }
    }
}

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct PageDraft {
    pub title: String,
    pub description: Option<String>,
    pub parent_id: Option<u32>,
    pub is_published: bool,
    pub is_private: bool,
    pub slug: Option<String>,
}

#[derive(Serialize)]
struct MovePageBody {
    page_id: u32,
    new_parent_id: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyDraft {
    pub name: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoDraft {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: Option<u32>,
    pub is_published: bool,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

// ========================
// Pages
// ========================

impl ApiClient {
    pub async fn list_pages(&self) -> Result<Vec<Page>, ApiError> {
        self.get("/pages").await
    }

    pub async fn create_page(&self, draft: &PageDraft) -> Result<Page, ApiError> {
        self.post("/pages", draft).await
    }

    pub async fn update_page(&self, id: u32, draft: &PageDraft) -> Result<Page, ApiError> {
        self.put(&format!("/pages/{}", id), draft).await
    }

    pub async fn delete_page(&self, id: u32) -> Result<(), ApiError> {
        self.delete(&format!("/pages/{}", id)).await
    }

    /// Re-parent a page. Sibling order is not part of the contract;
    /// the backend title-sorts siblings on every read.
    pub async fn move_page(&self, page_id: u32, new_parent_id: Option<u32>) -> Result<Page, ApiError> {
        self.post(
            &format!("/pages/{}/move", page_id),
            &MovePageBody { page_id, new_parent_id },
        )
        .await
    }
}

// ========================
// People
// ========================

impl ApiClient {
    pub async fn list_people(&self, search: Option<&str>) -> Result<Vec<Person>, ApiError> {
        self.get(&people_path(search)).await
    }

    pub async fn get_person(&self, id: u32) -> Result<Person, ApiError> {
        self.get(&format!("/people/{}", id)).await
    }

    pub async fn create_person(&self, draft: &PersonDraft) -> Result<Person, ApiError> {
        self.post("/people", draft).await
    }

    pub async fn update_person(&self, id: u32, draft: &PersonDraft) -> Result<Person, ApiError> {
        self.put(&format!("/people/{}", id), draft).await
    }

    pub async fn delete_person(&self, id: u32) -> Result<(), ApiError> {
        self.delete(&format!("/people/{}", id)).await
    }

    pub async fn list_person_addresses(&self, person_id: u32) -> Result<Vec<Address>, ApiError> {
        self.get(&format!("/people/{}/addresses", person_id)).await
    }

    pub async fn list_person_marriages(&self, person_id: u32) -> Result<Vec<Marriage>, ApiError> {
        self.get(&format!("/people/{}/marriages", person_id)).await
    }

    pub async fn list_marriage_children(
        &self,
        marriage_id: u32,
    ) -> Result<Vec<MarriageChild>, ApiError> {
        self.get(&format!("/marriages/{}/children", marriage_id)).await
    }
}

/// People listing path with an optional percent-encoded search term.
fn people_path(search: Option<&str>) -> String {
    match search.map(str::trim) {
        Some(q) if !q.is_empty() => {
            format!("/people?search={}", utf8_percent_encode(q, NON_ALPHANUMERIC))
        }
        _ => "/people".to_string(),
    }
}

// ========================
// Companies
// ========================

impl ApiClient {
    pub async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        self.get("/companies").await
    }

    pub async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ApiError> {
        self.post("/companies", draft).await
    }

    pub async fn update_company(&self, id: u32, draft: &CompanyDraft) -> Result<Company, ApiError> {
        self.put(&format!("/companies/{}", id), draft).await
    }

    pub async fn delete_company(&self, id: u32) -> Result<(), ApiError> {
        self.delete(&format!("/companies/{}", id)).await
    }
}

// ========================
// Videos
// ========================

impl ApiClient {
    pub async fn list_videos(&self) -> Result<Vec<Video>, ApiError> {
        self.get("/videos").await
    }

    pub async fn create_video(&self, draft: &VideoDraft) -> Result<Video, ApiError> {
        self.post("/videos", draft).await
    }

    pub async fn update_video(&self, id: u32, draft: &VideoDraft) -> Result<Video, ApiError> {
        self.put(&format!("/videos/{}", id), draft).await
    }

    pub async fn delete_video(&self, id: u32) -> Result<(), ApiError> {
        self.delete(&format!("/videos/{}", id)).await
    }
}

// ========================
// Session
// ========================

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.post("/session", &LoginBody { email, password }).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/session/me").await
    }
}

/// Where the backend lives: a compile-time override, else the
/// document origin the dashboard was served from.
pub fn default_base_url() -> String {
    if let Some(base) = option_env!("CASEDESK_API_BASE") {
        return base.to_string();
    }
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_prefix_and_trims_slash() {
        let client = ApiClient::new("https://api.example.test/");
        assert_eq!(client.url("/pages"), "https://api.example.test/api/v1/pages");

        let client = ApiClient::new("https://api.example.test");
        assert_eq!(
            client.url("/pages/3/move"),
            "https://api.example.test/api/v1/pages/3/move"
        );
    }

    #[test]
    fn test_people_search_is_percent_encoded() {
        assert_eq!(people_path(None), "/people");
        assert_eq!(people_path(Some("  ")), "/people");
        assert_eq!(
            people_path(Some("Ada Lovelace & co")),
            "/people?search=Ada%20Lovelace%20%26%20co"
        );
    }

    #[test]
    fn test_move_body_serializes_null_parent() {
        let body = serde_json::to_value(MovePageBody { page_id: 4, new_parent_id: None }).unwrap();
        assert_eq!(body, serde_json::json!({ "page_id": 4, "new_parent_id": null }));

        let body =
            serde_json::to_value(MovePageBody { page_id: 4, new_parent_id: Some(2) }).unwrap();
        assert_eq!(body, serde_json::json!({ "page_id": 4, "new_parent_id": 2 }));
    }
}
