use renderdesk::error::Result;
use renderdesk::types::display_timestamp;

use crate::cli::common::{print_json, require_session, settle, Context};

pub async fn run(ctx: &Context) -> Result<()> {
    let user = require_session(settle(ctx.client.whoami().await)?)?;

    if ctx.json {
        return print_json(&user);
    }

    println!("{}", user.email);
    let since = user
        .created_at
        .as_deref()
        .map(display_timestamp)
        .unwrap_or_else(|| "-".to_string());
    eprintln!("user id={} since={}", user.id, since);
    Ok(())
}
