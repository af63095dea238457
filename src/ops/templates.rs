use std::time::Duration;

use uuid::Uuid;

use crate::error::{RenderdeskError, Result};
use crate::gateway::ApiRequest;
use crate::navigate::{Navigation, Page};
use crate::notify::Notification;
use crate::ops::{Deletion, Services};
use crate::types::{NewTemplate, Template, TemplateChanges};

const SAVED_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Parse a template id. Ids are UUIDs, so nothing else can reach a request path.
pub fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim())
        .map_err(|_| RenderdeskError::Validation(format!("Invalid template id: {}", id)))
}

/// All templates of the current user.
///
/// An abandoned or failed call yields an empty list; the two are not told apart.
pub async fn list(services: &Services) -> Result<Vec<Template>> {
    match services.gateway.dispatch(ApiRequest::get("/templates")).await? {
        Some(response) if response.is_success() => response.json(),
        _ => Ok(Vec::new()),
    }
}

/// One template, including its content.
pub async fn show(services: &Services, id: &str) -> Result<Option<Template>> {
    let id = parse_id(id)?;
    let Some(response) = services
        .gateway
        .dispatch(ApiRequest::get(format!("/templates/{}", id)))
        .await?
    else {
        return Ok(None);
    };

    if !response.is_success() {
        return Err(response.into_error("Failed to load template"));
    }
    Ok(Some(response.json()?))
}

pub async fn create(services: &Services, template: &NewTemplate) -> Result<Option<Template>> {
    if template.name.trim().is_empty() {
        return Err(RenderdeskError::Validation("Template name is required".into()));
    }

    let body = serde_json::to_value(template)?;
    let Some(response) = services
        .gateway
        .dispatch(ApiRequest::post("/templates", body))
        .await?
    else {
        return Ok(None);
    };

    if !response.is_success() {
        return Err(response.into_error("Failed to create template"));
    }

    let created: Template = response.json()?;
    services
        .notifier
        .notify(Notification::success("Template created"));
    services
        .navigator
        .navigate(Navigation::after(Page::Templates, SAVED_REDIRECT_DELAY));
    Ok(Some(created))
}

pub async fn update(
    services: &Services,
    id: &str,
    changes: &TemplateChanges,
) -> Result<Option<Template>> {
    let id = parse_id(id)?;
    if changes.is_empty() {
        return Err(RenderdeskError::Validation("Nothing to update".into()));
    }

    let body = serde_json::to_value(changes)?;
    let Some(response) = services
        .gateway
        .dispatch(ApiRequest::put(format!("/templates/{}", id), body))
        .await?
    else {
        return Ok(None);
    };

    if !response.is_success() {
        return Err(response.into_error("Failed to update template"));
    }

    let updated: Template = response.json()?;
    services
        .notifier
        .notify(Notification::success("Template updated"));
    services
        .navigator
        .navigate(Navigation::after(Page::Templates, SAVED_REDIRECT_DELAY));
    Ok(Some(updated))
}

/// Delete after interactive confirmation; then reload the listing.
pub async fn delete(services: &Services, id: &str) -> Result<Deletion> {
    let id = parse_id(id)?;
    if !services
        .prompt
        .confirm("Are you sure you want to delete this template?")
    {
        return Ok(Deletion::Declined);
    }

    let Some(response) = services
        .gateway
        .dispatch(ApiRequest::delete(format!("/templates/{}", id)))
        .await?
    else {
        return Ok(Deletion::Abandoned);
    };

    if !response.is_success() {
        return Err(response.into_error("Failed to delete template"));
    }

    services
        .notifier
        .notify(Notification::success("Template deleted"));
    services.navigator.navigate(Navigation::reload());
    Ok(Deletion::Deleted)
}
