use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::error::Result;
use crate::navigate::{Navigation, Navigator, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No session; the navigator has been sent to the login page.
    Redirected,
}

/// Page-load check that protected pages are not reachable without a session.
///
/// Presence only: a stale token passes here and is caught by the gateway
/// when the backend rejects it.
pub struct SessionGuard {
    credentials: CredentialStore,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    pub fn new(credentials: CredentialStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            credentials,
            navigator,
        }
    }

    pub fn check(&self, page: Page) -> Result<Access> {
        if page.is_public() || self.credentials.has_session()? {
            return Ok(Access::Granted);
        }
        tracing::info!(page = %page, "no session, redirecting to login");
        self.navigator.navigate(Navigation::now(Page::Login));
        Ok(Access::Redirected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Navigation>>);

    impl Navigator for Recorder {
        fn navigate(&self, navigation: Navigation) {
            self.0.lock().unwrap().push(navigation);
        }
    }

    #[test]
    fn public_pages_pass_without_session() {
        let navigator = Arc::new(Recorder::default());
        let guard = SessionGuard::new(CredentialStore::in_memory(), navigator.clone());
        for page in [Page::Landing, Page::Login, Page::Register] {
            assert_eq!(guard.check(page).unwrap(), Access::Granted);
        }
        assert!(navigator.0.lock().unwrap().is_empty());
    }

    #[test]
    fn protected_page_without_session_redirects_to_login() {
        let navigator = Arc::new(Recorder::default());
        let guard = SessionGuard::new(CredentialStore::in_memory(), navigator.clone());
        assert_eq!(guard.check(Page::Dashboard).unwrap(), Access::Redirected);
        assert_eq!(
            navigator.0.lock().unwrap().as_slice(),
            &[Navigation::now(Page::Login)]
        );
    }

    #[test]
    fn any_token_is_enough() {
        let store = CredentialStore::in_memory();
        store
            .save(
                &SecretString::new("not-even-a-jwt".into()),
                &SecretString::new("r".into()),
            )
            .unwrap();
        let guard = SessionGuard::new(store, Arc::new(Recorder::default()));
        assert_eq!(guard.check(Page::ApiKeys).unwrap(), Access::Granted);
    }
}
