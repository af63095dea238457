//! Wire types exchanged with the rendering backend.

use chrono::{DateTime, NaiveDateTime};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Tokens returned by a successful login.
#[derive(Debug, Deserialize)]
pub struct TokenPair {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub s3_path: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Only present when a single template is fetched.
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `POST /templates`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTemplate {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /templates/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TemplateChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.description.is_none()
    }
}

/// An API key as listed. The raw key is deliberately not deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiKeyList {
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

/// A freshly issued key. The secret is shown once and never stored.
#[derive(Debug, Deserialize)]
pub struct IssuedKey {
    pub id: i64,
    pub key: SecretString,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

/// Render a backend timestamp for humans. Unknown formats pass through.
pub fn display_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
