use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use renderdesk::action::ActionOutcome;
use renderdesk::api::{ClientBuilder, RenderdeskClient};
use renderdesk::config::{self, Config};
use renderdesk::credentials::CredentialStore;
use renderdesk::error::{RenderdeskError, Result};
use renderdesk::navigate::{Destination, Navigation, NavigationSlot, Page};

use crate::cli::terminal::{TerminalNotifier, TerminalPrompt};

/// Everything a command handler needs, built once per invocation.
pub struct Context {
    pub client: RenderdeskClient,
    pub notifier: Arc<TerminalNotifier>,
    pub navigation: Arc<NavigationSlot>,
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn load(json: bool, assume_yes: bool) -> Result<Self> {
        let config = Config::load_effective(&config::config_path())?;
        let notifier = Arc::new(TerminalNotifier::new(json));
        let navigation = Arc::new(NavigationSlot::new());

        let client = ClientBuilder::from_config(&config)
            .credentials(CredentialStore::file(config::session_path()))
            .notifier(notifier.clone())
            .navigator(navigation.clone())
            .prompt(Arc::new(TerminalPrompt::new(assume_yes)))
            .build();

        Ok(Self {
            client,
            notifier,
            navigation,
            config,
            json,
        })
    }

    /// True when the last action ended with a forced return to the login page.
    pub fn session_rejected(&self) -> bool {
        matches!(
            self.navigation.pending(),
            Some(Navigation {
                destination: Destination::Page(Page::Login),
                ..
            })
        )
    }
}

/// Turn an action outcome into a command result.
///
/// Failures were already shown by the notifier; they are passed on for the
/// exit status only.
pub fn settle<T>(outcome: ActionOutcome<T>) -> Result<T> {
    outcome.into_result()
}

/// Unwrap an authenticated result; `None` means the session was rejected.
pub fn require_session<T>(value: Option<T>) -> Result<T> {
    value.ok_or(RenderdeskError::SessionExpired)
}

/// Read text from a file path, or stdin when the path is '-'.
pub fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| RenderdeskError::Other(format!("Failed to read from stdin: {}", e)))?;
        return Ok(buf);
    }
    fs::read_to_string(path)
        .map_err(|e| RenderdeskError::Other(format!("Cannot read {}: {}", path, e)))
}

/// Fail when the last call was abandoned on a rejected session.
///
/// Listings come back empty in that case and must not be printed as if they
/// were real.
pub fn ensure_session(ctx: &Context) -> Result<()> {
    if ctx.session_rejected() {
        return Err(RenderdeskError::SessionExpired);
    }
    Ok(())
}

/// Suggest the command for the page a successful action navigated to.
pub fn next_step_hint(page: Page) -> Option<&'static str> {
    match page {
        Page::Dashboard => Some("renderdesk whoami"),
        Page::Login => Some("renderdesk login"),
        Page::Templates => Some("renderdesk templates list"),
        Page::ApiKeys => Some("renderdesk keys list"),
        Page::Render => Some("renderdesk render <template-id>"),
        Page::Landing | Page::Register | Page::NewTemplate => None,
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
