//! Notifier capability: transient outcome messages and the one-time secret panel.

use std::fmt;

use secrecy::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One outcome message. Owned by whoever presents it; nothing keeps a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

pub trait Notifier: Send + Sync {
    /// Show a transient message.
    fn notify(&self, notification: Notification);

    /// Reveal a secret exactly once in a dismissible panel.
    ///
    /// Implementations must not retain `secret` after returning.
    fn reveal_secret(&self, title: &str, secret: &SecretString);
}

/// Discards everything. Useful for embedders that report outcomes themselves;
/// an issued API key still reaches them as the operation's return value.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(severity = %notification.severity, message = %notification.message, "notification");
    }

    fn reveal_secret(&self, title: &str, _secret: &SecretString) {
        tracing::debug!(title, "secret reveal suppressed");
    }
}
