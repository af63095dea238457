use renderdesk::error::Result;

use crate::cli::common::Context;

pub fn run(ctx: &Context) -> Result<()> {
    ctx.client.logout()?;
    eprintln!("Logged out.");
    Ok(())
}
