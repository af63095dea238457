//! Resource operations built on the request gateway.
//!
//! Each operation extracts its inputs, makes one gateway call, and handles
//! the outcome: success feedback and navigation here, failures returned as
//! errors for the action runner to report. Authenticated operations return
//! `Ok(None)` when the gateway abandoned the call on a rejected session.

pub mod account;
pub mod apikeys;
pub mod auth;
pub mod render;
pub mod templates;

use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::gateway::RequestGateway;
use crate::navigate::Navigator;
use crate::notify::Notifier;

/// Interactive yes/no confirmation.
pub trait Prompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// Declines every confirmation. The safe default without a user present.
pub struct Decline;

impl Prompt for Decline {
    fn confirm(&self, question: &str) -> bool {
        tracing::debug!(question, "confirmation declined (no prompt)");
        false
    }
}

/// Result of a confirmed destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The user did not confirm; nothing was sent.
    Declined,
    /// The session was rejected mid-call.
    Abandoned,
}

/// Collaborators every operation needs.
pub struct Services {
    pub gateway: RequestGateway,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub prompt: Arc<dyn Prompt>,
}

impl Services {
    pub fn credentials(&self) -> &CredentialStore {
        self.gateway.credentials()
    }
}
