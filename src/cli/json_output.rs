use serde::Serialize;

use renderdesk::types::{ApiKey, Template};

/// JSON response for `renderdesk templates list --json`.
#[derive(Serialize)]
pub struct TemplateListResponse<'a> {
    pub templates: &'a [Template],
    pub total: usize,
}

/// JSON response for `renderdesk keys list --json`.
#[derive(Serialize)]
pub struct KeyListResponse<'a> {
    pub api_keys: &'a [ApiKey],
    pub total: usize,
}

/// JSON response for `renderdesk render --json`.
#[derive(Serialize)]
pub struct RenderResponse {
    pub template_id: String,
    pub path: String,
}

/// JSON response for `renderdesk status --json`.
#[derive(Serialize)]
pub struct StatusResponse {
    pub api: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    pub logged_in: bool,
}
