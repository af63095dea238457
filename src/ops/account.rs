use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::ops::Services;
use crate::types::{Health, User};

/// The user the current session belongs to.
pub async fn whoami(services: &Services) -> Result<Option<User>> {
    let Some(response) = services.gateway.dispatch(ApiRequest::get("/me")).await? else {
        return Ok(None);
    };
    if !response.is_success() {
        return Err(response.into_error("Failed to load account"));
    }
    Ok(Some(response.json()?))
}

/// Backend liveness. Needs no session.
pub async fn health(services: &Services) -> Result<Health> {
    let response = services
        .gateway
        .dispatch_public(ApiRequest::get("/health"))
        .await?;
    if !response.is_success() {
        return Err(response.into_error("Backend is not healthy"));
    }
    response.json()
}
