//! Credential Store: the one owner of the current session's tokens.
//!
//! [`CredentialStore`] is a cheap clonable handle over a [`TokenStore`]
//! backend. It is passed explicitly to the request gateway and the session
//! guard; nothing else keeps a copy of the tokens longer than one call.

pub mod file;

use std::fmt;
use std::sync::{Arc, Mutex};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;

pub use file::FileTokenStore;

/// Persisted form of a session. Zeroized when dropped.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl StoredSession {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Storage backend for the two token slots.
pub trait TokenStore: Send + Sync {
    /// Load the stored session. An absent store is an empty session, not an error.
    fn load(&self) -> Result<StoredSession>;
    /// Replace whatever is stored.
    fn persist(&self, session: &StoredSession) -> Result<()>;
    /// Remove both slots. Must succeed when nothing is stored.
    fn remove(&self) -> Result<()>;
}

/// In-process token storage, for embedding and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: Mutex<StoredSession>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<StoredSession> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn persist(&self, session: &StoredSession) -> Result<()> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session.clone();
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = StoredSession::default();
        Ok(())
    }
}

/// Handle to the session's access and refresh tokens.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn TokenStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn TokenStore>) -> Self {
        Self { backend }
    }

    /// A store backed by [`MemoryTokenStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// A store backed by the session file at `path`.
    pub fn file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileTokenStore::new(path)))
    }

    /// Persist both tokens, overwriting prior values. Contents are opaque.
    pub fn save(&self, access: &SecretString, refresh: &SecretString) -> Result<()> {
        let session = StoredSession {
            access_token: Some(access.expose_secret().clone()),
            refresh_token: Some(refresh.expose_secret().clone()),
        };
        self.backend.persist(&session)?;
        tracing::info!("session saved");
        Ok(())
    }

    /// The current access token, if any.
    pub fn read(&self) -> Result<Option<SecretString>> {
        let mut session = self.backend.load()?;
        Ok(session.access_token.take().map(SecretString::new))
    }

    /// The stored refresh token. Kept for a future exchange flow; never sent.
    pub fn refresh_token(&self) -> Result<Option<SecretString>> {
        let mut session = self.backend.load()?;
        Ok(session.refresh_token.take().map(SecretString::new))
    }

    /// Remove both tokens. Idempotent.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove()?;
        tracing::info!("session cleared");
        Ok(())
    }

    /// True when an access token is present. Says nothing about validity.
    pub fn has_session(&self) -> Result<bool> {
        Ok(self.read()?.is_some())
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[test]
    fn read_returns_latest_saved_access_token() {
        let store = CredentialStore::in_memory();
        assert!(store.read().unwrap().is_none());

        for (access, refresh) in [("T1", "R1"), ("T2", "R2"), ("T3", "R3")] {
            store.save(&secret(access), &secret(refresh)).unwrap();
            assert_eq!(store.read().unwrap().unwrap().expose_secret(), access);
            assert_eq!(store.refresh_token().unwrap().unwrap().expose_secret(), refresh);
        }
    }

    #[test]
    fn clear_is_idempotent_and_empties_both_slots() {
        let store = CredentialStore::in_memory();
        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());

        store.save(&secret("T1"), &secret("R1")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
        assert!(!store.has_session().unwrap());
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let session = StoredSession {
            access_token: Some("T1-very-secret".into()),
            refresh_token: None,
        };
        let shown = format!("{:?}", session);
        assert!(!shown.contains("T1-very-secret"));
        assert!(shown.contains("REDACTED"));
    }
}
