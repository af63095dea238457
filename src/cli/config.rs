use renderdesk::error::{RenderdeskError, Result};

use crate::cli::common::Context;
use crate::cli::ConfigCommands;

pub fn run(ctx: &Context, cmd: &ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let toml_str = toml::to_string_pretty(&ctx.config)
        .map_err(|e| RenderdeskError::Config(format!("serialize error: {}", e)))?;
    println!("{}", toml_str);
    Ok(())
}
