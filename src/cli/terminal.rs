use std::env;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

use console::style;
use secrecy::{ExposeSecret, SecretString};

use renderdesk::error::{RenderdeskError, Result};
use renderdesk::notify::{Notification, Notifier, Severity};
use renderdesk::ops::Prompt;

const NON_INTERACTIVE_ENV: &str = "RENDERDESK_NON_INTERACTIVE";

/// Check if we are in non-interactive mode.
/// Returns true if stdin is not a TTY or RENDERDESK_NON_INTERACTIVE=1 is set.
pub fn is_non_interactive() -> bool {
    if env::var(NON_INTERACTIVE_ENV)
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        return true;
    }
    !std::io::stdin().is_terminal()
}

/// Writes notifications to stderr. Revealed secrets go to stdout, once.
pub struct TerminalNotifier {
    json: bool,
    error_shown: AtomicBool,
}

impl TerminalNotifier {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            error_shown: AtomicBool::new(false),
        }
    }

    /// Whether an error has already been printed for the user.
    pub fn error_shown(&self) -> bool {
        self.error_shown.load(Ordering::Acquire)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                eprintln!("{} {}", style("✓").green().bold(), notification.message);
            }
            Severity::Error => {
                // In --json mode main prints the error envelope instead.
                if self.json {
                    return;
                }
                eprintln!("{} {}", style("✗").red().bold(), notification.message);
                self.error_shown.store(true, Ordering::Release);
            }
        }
    }

    fn reveal_secret(&self, title: &str, secret: &SecretString) {
        eprintln!("{}", style(title).yellow().bold());
        if self.json {
            println!("{}", serde_json::json!({ "key": secret.expose_secret() }));
        } else {
            println!("{}", secret.expose_secret());
        }
    }
}

/// Confirmation through dialoguer. Declines when nobody can answer.
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if is_non_interactive() {
            eprintln!("{} (pass --yes to confirm non-interactively)", question);
            return false;
        }
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Take a value from a flag, or prompt for it on a TTY.
pub fn input_or_prompt(value: Option<&str>, label: &str) -> Result<String> {
    if let Some(v) = value {
        return Ok(v.to_string());
    }
    if is_non_interactive() {
        return Err(RenderdeskError::Validation(format!(
            "{} is required (no TTY to prompt on)",
            label
        )));
    }
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| RenderdeskError::Other(format!("Failed to read {}: {}", label, e)))
}

/// Take a password from a flag, or prompt for it without echo.
pub fn password_or_prompt(value: Option<&str>, label: &str) -> Result<SecretString> {
    if let Some(v) = value {
        return Ok(SecretString::new(v.to_string()));
    }
    if is_non_interactive() {
        return Err(RenderdeskError::Validation(format!(
            "{} is required (no TTY to prompt on)",
            label
        )));
    }
    dialoguer::Password::new()
        .with_prompt(label)
        .interact()
        .map(SecretString::new)
        .map_err(|e| RenderdeskError::Other(format!("Failed to read {}: {}", label, e)))
}
