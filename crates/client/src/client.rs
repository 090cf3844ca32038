//! Backend HTTP client.
//!
//! One method per endpoint of the observed contract. All calls block the
//! caller; the store layer decides pacing and fan-out.

use std::time::Duration;

use atelier_core::{Item, ItemStatus, Project, Room};

use crate::config::ApiConfig;

/// Backend API client (blocking).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

/// Error type for backend calls.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Network error (connect, timeout, body read)
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Server rejected the request (400/422 with message)
    Validation(String),
    /// JSON parsing error
    Parse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiClient {
    /// Create a new client from config.
    pub fn new(config: ApiConfig) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("atelier/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            api_base: config.api_base,
        }
    }

    /// Create a new client resolving the base URL from the environment.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    // ── Projects ────────────────────────────────────────────────────

    pub fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let url = format!("{}/api/projects", self.api_base);
        self.get_json(&url, &[])
    }

    pub fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        let url = format!("{}/api/projects/{}", self.api_base, id);
        self.get_json(&url, &[])
    }

    /// Create a project from a questionnaire submission payload.
    pub fn create_project(&self, payload: &serde_json::Value) -> Result<Project, ApiError> {
        let url = format!("{}/api/projects", self.api_base);
        self.send_json(self.http.post(&url), payload)
    }

    pub fn update_project(
        &self,
        id: &str,
        patch: &serde_json::Value,
    ) -> Result<Project, ApiError> {
        let url = format!("{}/api/projects/{}", self.api_base, id);
        self.send_json(self.http.put(&url), patch)
    }

    pub fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/projects/{}", self.api_base, id);
        self.delete(&url)
    }

    // ── Rooms ───────────────────────────────────────────────────────

    pub fn list_rooms(&self, project_id: &str) -> Result<Vec<Room>, ApiError> {
        let url = format!("{}/api/rooms", self.api_base);
        self.get_json(&url, &[("project_id", project_id)])
    }

    pub fn create_room(
        &self,
        project_id: &str,
        name: &str,
        notes: Option<&str>,
    ) -> Result<Room, ApiError> {
        let url = format!("{}/api/rooms", self.api_base);
        let mut body = serde_json::json!({
            "project_id": project_id,
            "name": name,
        });
        if let Some(notes) = notes {
            body["notes"] = serde_json::Value::from(notes);
        }
        self.send_json(self.http.post(&url), &body)
    }

    pub fn update_room(&self, id: &str, patch: &serde_json::Value) -> Result<Room, ApiError> {
        let url = format!("{}/api/rooms/{}", self.api_base, id);
        self.send_json(self.http.put(&url), patch)
    }

    pub fn delete_room(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/rooms/{}", self.api_base, id);
        self.delete(&url)
    }

    // ── Items ───────────────────────────────────────────────────────

    /// List a project's items, optionally restricted to one status.
    pub fn list_items(
        &self,
        project_id: &str,
        status: Option<ItemStatus>,
    ) -> Result<Vec<Item>, ApiError> {
        let url = format!("{}/api/items", self.api_base);
        match status {
            Some(status) => {
                self.get_json(&url, &[("project_id", project_id), ("status", status.as_str())])
            }
            None => self.get_json(&url, &[("project_id", project_id)]),
        }
    }

    pub fn create_item(&self, payload: &serde_json::Value) -> Result<Item, ApiError> {
        let url = format!("{}/api/items", self.api_base);
        self.send_json(self.http.post(&url), payload)
    }

    /// Bulk-create items (the undo path). One request per call; the store
    /// chunks larger sets.
    pub fn create_items_bulk(
        &self,
        payloads: &[serde_json::Value],
    ) -> Result<Vec<Item>, ApiError> {
        let url = format!("{}/api/items/bulk", self.api_base);
        self.send_json(self.http.post(&url), &serde_json::Value::Array(payloads.to_vec()))
    }

    /// Partial update: `patch` carries only the fields being changed.
    pub fn update_item(&self, id: &str, patch: &serde_json::Value) -> Result<Item, ApiError> {
        let url = format!("{}/api/items/{}", self.api_base, id);
        self.send_json(self.http.put(&url), patch)
    }

    pub fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/items/{}", self.api_base, id);
        self.delete(&url)
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = Self::check_status(response)?;
        response
            .json::<T>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::blocking::RequestBuilder,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let response = req
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = Self::check_status(response)?;
        response
            .json::<T>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn delete(&self, url: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(url)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check_status(response)?;
        Ok(())
    }

    fn check_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        log::debug!("backend returned {}: {}", status, body);
        if status == 422 || status == 400 {
            return Err(ApiError::Validation(body));
        }
        Err(ApiError::Http(status, body))
    }
}
