//! Pages and the Navigator capability that acts on destinations.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    Login,
    Register,
    Dashboard,
    Templates,
    NewTemplate,
    Render,
    ApiKeys,
}

/// Pages reachable without a session.
pub const PUBLIC_PAGES: [Page; 3] = [Page::Landing, Page::Login, Page::Register];

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Landing => "/",
            Page::Login => "/login",
            Page::Register => "/register",
            Page::Dashboard => "/dashboard",
            Page::Templates => "/templates",
            Page::NewTemplate => "/templates/new",
            Page::Render => "/render",
            Page::ApiKeys => "/apikeys",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let all = [
            Page::Landing,
            Page::Login,
            Page::Register,
            Page::Dashboard,
            Page::Templates,
            Page::NewTemplate,
            Page::Render,
            Page::ApiKeys,
        ];
        all.into_iter().find(|p| p.path() == path)
    }

    pub fn is_public(&self) -> bool {
        PUBLIC_PAGES.contains(self)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Page(Page),
    /// Reload the current listing.
    Reload,
}

/// A full-page navigation. Nothing survives it except the Credential Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub destination: Destination,
    /// Time to leave the last notification visible before leaving.
    pub delay: Duration,
}

impl Navigation {
    pub fn now(page: Page) -> Self {
        Self {
            destination: Destination::Page(page),
            delay: Duration::ZERO,
        }
    }

    pub fn after(page: Page, delay: Duration) -> Self {
        Self {
            destination: Destination::Page(page),
            delay,
        }
    }

    pub fn reload() -> Self {
        Self {
            destination: Destination::Reload,
            delay: Duration::ZERO,
        }
    }

    pub fn page(&self) -> Option<Page> {
        match self.destination {
            Destination::Page(page) => Some(page),
            Destination::Reload => None,
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, navigation: Navigation);
}

/// Keeps the most recent navigation for the front-end to act on once the
/// current action has finished.
#[derive(Default)]
pub struct NavigationSlot {
    pending: Mutex<Option<Navigation>>,
}

impl NavigationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<Navigation> {
        *self.lock()
    }

    pub fn take(&self) -> Option<Navigation> {
        self.lock().take()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Navigation>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for NavigationSlot {
    fn navigate(&self, navigation: Navigation) {
        tracing::debug!(destination = ?navigation.destination, "navigate");
        *self.lock() = Some(navigation);
    }
}
