//! Request Gateway: the single chokepoint for calls to the backend.
//!
//! Every authenticated call, including ones that return a document, goes
//! through [`RequestGateway::dispatch`]. The gateway injects the bearer token,
//! applies the session-expiry policy on 401, and decodes the body according
//! to the [`ResponseKind`] the caller expects.

pub mod transport;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::credentials::CredentialStore;
use crate::error::{RenderdeskError, Result};
use crate::navigate::{Navigation, Navigator, Page};

pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

/// Status the backend uses for an authoritative rejection of the session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// What the caller expects a successful body to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Json,
    Binary,
}

/// One API call, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub expect: ResponseKind,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            expect: ResponseKind::Json,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn expecting(mut self, kind: ResponseKind) -> Self {
        self.expect = kind;
        self
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Text(String),
    Binary(Vec<u8>),
}

/// A response handed back unchanged for the caller to interpret.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: Body,
}

impl ApiResponse {
    fn decode(raw: HttpResponse, expect: ResponseKind) -> Self {
        let ok = (200..300).contains(&raw.status);
        let body = if raw.body.is_empty() {
            Body::Empty
        } else if ok && expect == ResponseKind::Binary {
            Body::Binary(raw.body)
        } else {
            // Error bodies are JSON regardless of what the caller expected.
            match serde_json::from_slice::<Value>(&raw.body) {
                Ok(value) => Body::Json(value),
                Err(_) => Body::Text(String::from_utf8_lossy(&raw.body).into_owned()),
            }
        };
        Self {
            status: raw.status,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Deserialize a JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            Body::Json(value) => Ok(T::deserialize(value)?),
            Body::Empty => Err(RenderdeskError::Serialization(
                "expected a JSON body, got an empty response".into(),
            )),
            Body::Text(_) | Body::Binary(_) => Err(RenderdeskError::Serialization(
                "expected a JSON body".into(),
            )),
        }
    }

    /// The backend's `detail` message, if the body carries one.
    ///
    /// Validation failures carry a list of `{msg}` objects instead of a string.
    pub fn detail(&self) -> Option<String> {
        let Body::Json(value) = &self.body else {
            return None;
        };
        match value.get("detail")? {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }

    /// Binary body of a successful document response.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self.body {
            Body::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Application error from this response: backend detail or `fallback`.
    pub fn into_error(self, fallback: &str) -> RenderdeskError {
        RenderdeskError::api(self.status, self.detail(), fallback)
    }
}

pub struct RequestGateway {
    transport: Arc<dyn Transport>,
    credentials: CredentialStore,
    navigator: Arc<dyn Navigator>,
    base_url: String,
}

impl RequestGateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: CredentialStore,
        navigator: Arc<dyn Navigator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            navigator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Send an authenticated call.
    ///
    /// Returns `Ok(None)` when the backend rejected the session: the store has
    /// been cleared and the navigator sent to the login page. Callers treat
    /// that as "operation abandoned" and must not look for a body.
    /// Transport failures are returned as errors and not handled here.
    pub async fn dispatch(&self, request: ApiRequest) -> Result<Option<ApiResponse>> {
        let token = self.credentials.read()?;
        let expect = request.expect;
        let mut http = self.build(request);
        if let Some(token) = token {
            set_header(
                &mut http.headers,
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }

        tracing::debug!(method = %http.method, url = %http.url, "dispatch");
        let raw = self.transport.send(http).await?;

        if raw.status == STATUS_UNAUTHORIZED {
            tracing::warn!("session rejected by backend, clearing credentials");
            self.credentials.clear()?;
            self.navigator.navigate(Navigation::now(Page::Login));
            return Ok(None);
        }

        Ok(Some(ApiResponse::decode(raw, expect)))
    }

    /// Send a call without a token and without the rejection policy.
    ///
    /// Used for login and registration, where 401 means bad credentials
    /// rather than an expired session.
    pub async fn dispatch_public(&self, request: ApiRequest) -> Result<ApiResponse> {
        let expect = request.expect;
        let http = self.build(request);
        tracing::debug!(method = %http.method, url = %http.url, "dispatch (public)");
        let raw = self.transport.send(http).await?;
        Ok(ApiResponse::decode(raw, expect))
    }

    fn build(&self, request: ApiRequest) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in request.headers {
            set_header(&mut headers, &name, value);
        }
        let body = request.body.map(|value| value.to_string().into_bytes());
        HttpRequest {
            method: request.method,
            url: format!("{}{}", self.base_url, request.path),
            headers,
            body,
        }
    }
}

/// Insert or replace a header, matching names case-insensitively.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    if let Some(slot) = headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        slot.1 = value;
    } else {
        headers.push((name.to_string(), value));
    }
}
