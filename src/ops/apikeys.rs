use serde_json::json;

use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::navigate::Navigation;
use crate::notify::Notification;
use crate::ops::{Deletion, Services};
use crate::types::{ApiKey, ApiKeyList, IssuedKey};

/// All API keys of the current user. Empty when abandoned or failed.
pub async fn list(services: &Services) -> Result<Vec<ApiKey>> {
    match services.gateway.dispatch(ApiRequest::get("/apikeys")).await? {
        Some(response) if response.is_success() => {
            let list: ApiKeyList = response.json()?;
            Ok(list.api_keys)
        }
        _ => Ok(Vec::new()),
    }
}

/// Issue a key, reveal it through the notifier and hand it to the caller.
///
/// The backend never returns the key again and nothing on this side keeps a
/// copy: the returned [`IssuedKey`] is the only one.
pub async fn create(services: &Services, name: &str) -> Result<Option<IssuedKey>> {
    let Some(response) = services
        .gateway
        .dispatch(ApiRequest::post("/apikeys/create", json!({ "name": name })))
        .await?
    else {
        return Ok(None);
    };

    if !response.is_success() {
        return Err(response.into_error("Failed to create API key"));
    }

    let issued: IssuedKey = response.json()?;
    services.notifier.reveal_secret(
        "New API key (copy it now, it will not be shown again)",
        &issued.key,
    );
    Ok(Some(issued))
}

/// Revoke after interactive confirmation; then reload the listing.
pub async fn delete(services: &Services, id: i64) -> Result<Deletion> {
    if !services
        .prompt
        .confirm("Are you sure you want to revoke this API key?")
    {
        return Ok(Deletion::Declined);
    }

    let Some(response) = services
        .gateway
        .dispatch(ApiRequest::delete(format!("/apikeys/{}", id)))
        .await?
    else {
        return Ok(Deletion::Abandoned);
    };

    if !response.is_success() {
        return Err(response.into_error("Failed to revoke API key"));
    }

    services.notifier.notify(Notification::success("API key revoked"));
    services.navigator.navigate(Navigation::reload());
    Ok(Deletion::Deleted)
}
