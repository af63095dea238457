use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::error::{RenderdeskError, Result};
use crate::gateway::ApiRequest;
use crate::navigate::{Navigation, Page};
use crate::notify::Notification;
use crate::ops::Services;
use crate::types::TokenPair;

/// Leaves the success message on screen before moving to the dashboard.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(500);
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

pub async fn login(services: &Services, email: &str, password: &SecretString) -> Result<()> {
    let body = json!({
        "email": email,
        "password": password.expose_secret(),
    });
    let response = services
        .gateway
        .dispatch_public(ApiRequest::post("/auth/login", body))
        .await?;

    if !response.is_success() {
        return Err(response.into_error("Login failed"));
    }

    let tokens: TokenPair = response.json()?;
    services
        .credentials()
        .save(&tokens.access_token, &tokens.refresh_token)?;

    services.notifier.notify(Notification::success("Logged in"));
    services
        .navigator
        .navigate(Navigation::after(Page::Dashboard, LOGIN_REDIRECT_DELAY));
    Ok(())
}

/// Create an account. The confirmation is checked before anything is sent.
///
/// Registration does not sign in; the user is sent to the login page.
pub async fn register(
    services: &Services,
    email: &str,
    password: &SecretString,
    confirmation: &SecretString,
) -> Result<()> {
    if password.expose_secret() != confirmation.expose_secret() {
        return Err(RenderdeskError::Validation("Passwords do not match".into()));
    }

    let body = json!({
        "email": email,
        "password": password.expose_secret(),
    });
    let response = services
        .gateway
        .dispatch_public(ApiRequest::post("/auth/register", body))
        .await?;

    if !response.is_success() {
        return Err(response.into_error("Registration failed"));
    }

    services
        .notifier
        .notify(Notification::success("Account created"));
    services
        .navigator
        .navigate(Navigation::after(Page::Login, REGISTER_REDIRECT_DELAY));
    Ok(())
}

/// Forget the session locally. No request is made.
pub fn logout(services: &Services) -> Result<()> {
    services.credentials().clear()?;
    services.navigator.navigate(Navigation::now(Page::Login));
    Ok(())
}
