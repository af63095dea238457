use renderdesk::error::Result;

use crate::cli::common::{print_json, Context};
use crate::cli::json_output::StatusResponse;

/// Landing page: backend health and local session presence.
///
/// An unreachable backend is reported but is not an error here.
pub async fn run(ctx: &Context) -> Result<()> {
    let health = match ctx.client.health().await {
        Ok(h) => Some(h.status),
        Err(e) => {
            tracing::debug!(error = %e, "health check failed");
            None
        }
    };
    let logged_in = ctx.client.credentials().has_session()?;
    let api = ctx.config.api.base_url.clone();

    if ctx.json {
        return print_json(&StatusResponse {
            api,
            health,
            logged_in,
        });
    }

    println!(
        "api      {} ({})",
        api,
        health.as_deref().unwrap_or("unreachable")
    );
    println!(
        "session  {}",
        if logged_in { "logged in" } else { "not logged in" }
    );
    Ok(())
}
