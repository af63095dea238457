use renderdesk::error::{RenderdeskError, Result};
use renderdesk::navigate::Destination;
use renderdesk::ops::Deletion;
use renderdesk::types::display_timestamp;

use crate::cli::common::{ensure_session, print_json, require_session, settle, Context};
use crate::cli::json_output::KeyListResponse;
use crate::cli::KeyCommands;

pub async fn run(ctx: &Context, cmd: &KeyCommands) -> Result<()> {
    match cmd {
        KeyCommands::List => list(ctx).await,
        KeyCommands::Create { name } => create(ctx, name).await,
        KeyCommands::Delete { id } => delete(ctx, *id).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let keys = settle(ctx.client.list_api_keys().await)?;
    ensure_session(ctx)?;

    if ctx.json {
        return print_json(&KeyListResponse {
            api_keys: &keys,
            total: keys.len(),
        });
    }

    if keys.is_empty() {
        eprintln!("No API keys.");
        return Ok(());
    }
    for key in &keys {
        let created = key
            .created_at
            .as_deref()
            .map(display_timestamp)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8}  {:<24}  created={}",
            key.id,
            key.name.as_deref().unwrap_or("-"),
            created
        );
    }
    Ok(())
}

async fn create(ctx: &Context, name: &str) -> Result<()> {
    // The key itself is revealed by the notifier, once.
    let issued = require_session(settle(ctx.client.create_api_key(name).await)?)?;
    eprintln!("API key {} created.", issued.id);
    Ok(())
}

async fn delete(ctx: &Context, id: i64) -> Result<()> {
    match settle(ctx.client.delete_api_key(id).await)? {
        Deletion::Deleted => {}
        Deletion::Declined => return Err(RenderdeskError::Cancelled),
        Deletion::Abandoned => return Err(RenderdeskError::SessionExpired),
    }

    if matches!(
        ctx.navigation.take().map(|n| n.destination),
        Some(Destination::Reload)
    ) {
        list(ctx).await?;
    }
    Ok(())
}
