use std::path::PathBuf;

use renderdesk::error::Result;

use crate::cli::common::{print_json, read_source, require_session, settle, Context};
use crate::cli::json_output::RenderResponse;

pub async fn run(
    ctx: &Context,
    template_id: &str,
    data: Option<&str>,
    data_file: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    let payload = match (data, data_file) {
        (Some(d), _) => d.to_string(),
        (None, Some(path)) => read_source(path)?,
        (None, None) => String::new(),
    };
    let destination = PathBuf::from(output.unwrap_or(&ctx.config.output.dir));

    let saved = require_session(settle(
        ctx.client
            .render(template_id, &payload, &destination)
            .await,
    )?)?;

    if ctx.json {
        return print_json(&RenderResponse {
            template_id: template_id.to_string(),
            path: saved.display().to_string(),
        });
    }
    println!("{}", saved.display());
    Ok(())
}
