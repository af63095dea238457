use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderdeskError {
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-ok status. Displays the detail verbatim.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// No response was obtained at all.
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Not logged in. Run `renderdesk login` first.")]
    NotLoggedIn,

    #[error("Session expired. Run `renderdesk login` to sign in again.")]
    SessionExpired,

    #[error("Cancelled")]
    Cancelled,

    #[error("Another invocation of this action is still in flight")]
    Busy,

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl RenderdeskError {
    /// Build an application error from a backend `detail`, or the given fallback when absent.
    pub fn api(status: u16, detail: Option<String>, fallback: &str) -> Self {
        RenderdeskError::Api {
            status,
            detail: detail.unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// True when no response was obtained from the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, RenderdeskError::Transport(_))
    }

    /// Return a typed exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            RenderdeskError::Validation(_) => 2,
            RenderdeskError::Api { .. } => 3,
            RenderdeskError::Transport(_) => 4,
            RenderdeskError::NotLoggedIn => 6,
            RenderdeskError::SessionExpired => 6,
            RenderdeskError::Cancelled => 5,
            RenderdeskError::Busy => 1,
            RenderdeskError::Config(_) => 1,
            RenderdeskError::Serialization(_) => 1,
            RenderdeskError::Io(_) => 1,
            RenderdeskError::Other(_) => 1,
        }
    }

    /// Return a string error code identifier.
    pub fn error_code(&self) -> &'static str {
        match self {
            RenderdeskError::Validation(_) => "validation_error",
            RenderdeskError::Api { .. } => "api_error",
            RenderdeskError::Transport(_) => "connection_error",
            RenderdeskError::NotLoggedIn => "not_logged_in",
            RenderdeskError::SessionExpired => "session_expired",
            RenderdeskError::Cancelled => "cancelled",
            RenderdeskError::Busy => "busy",
            RenderdeskError::Config(_) => "config_error",
            RenderdeskError::Serialization(_) => "serialization_error",
            RenderdeskError::Io(_) => "io_error",
            RenderdeskError::Other(_) => "error",
        }
    }
}

impl From<serde_json::Error> for RenderdeskError {
    fn from(e: serde_json::Error) -> Self {
        RenderdeskError::Serialization(e.to_string())
    }
}

/// JSON error response for --json mode.
#[derive(Serialize)]
pub struct JsonError {
    pub error: JsonErrorDetail,
}

#[derive(Serialize)]
pub struct JsonErrorDetail {
    pub code: String,
    pub message: String,
    pub exit_code: i32,
}

impl JsonError {
    pub fn from_error(e: &RenderdeskError) -> Self {
        Self {
            error: JsonErrorDetail {
                code: e.error_code().to_string(),
                message: e.to_string(),
                exit_code: e.exit_code(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderdeskError>;
