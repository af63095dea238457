use renderdesk::error::{RenderdeskError, Result};
use renderdesk::navigate::Destination;
use renderdesk::ops::Deletion;
use renderdesk::types::{display_timestamp, NewTemplate, TemplateChanges};

use crate::cli::common::{
    ensure_session, print_json, read_source, require_session, settle, Context,
};
use crate::cli::json_output::TemplateListResponse;
use crate::cli::TemplateCommands;

pub async fn run(ctx: &Context, cmd: &TemplateCommands) -> Result<()> {
    match cmd {
        TemplateCommands::List => list(ctx).await,
        TemplateCommands::Show { id } => show(ctx, id).await,
        TemplateCommands::Create {
            name,
            content,
            file,
            description,
        } => {
            let content = match (content, file) {
                (Some(c), _) => c.clone(),
                (None, Some(path)) => read_source(path)?,
                (None, None) => {
                    return Err(RenderdeskError::Validation(
                        "Template content is required (--content or --file)".into(),
                    ))
                }
            };
            let template = NewTemplate {
                name: name.clone(),
                content,
                description: description.clone(),
            };
            create(ctx, &template).await
        }
        TemplateCommands::Update {
            id,
            name,
            content,
            file,
            description,
        } => {
            let content = match (content, file) {
                (Some(c), _) => Some(c.clone()),
                (None, Some(path)) => Some(read_source(path)?),
                (None, None) => None,
            };
            let changes = TemplateChanges {
                name: name.clone(),
                content,
                description: description.clone(),
            };
            update(ctx, id, &changes).await
        }
        TemplateCommands::Delete { id } => delete(ctx, id).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let templates = settle(ctx.client.list_templates().await)?;
    ensure_session(ctx)?;

    if ctx.json {
        return print_json(&TemplateListResponse {
            templates: &templates,
            total: templates.len(),
        });
    }

    if templates.is_empty() {
        eprintln!("No templates.");
        return Ok(());
    }
    for t in &templates {
        let created = t
            .created_at
            .as_deref()
            .map(display_timestamp)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<36}  {:<24}  created={}  {}",
            t.id,
            t.name,
            created,
            t.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn show(ctx: &Context, id: &str) -> Result<()> {
    let template = require_session(settle(ctx.client.show_template(id).await)?)?;

    if ctx.json {
        return print_json(&template);
    }

    eprintln!("{} ({})", template.name, template.id);
    if let Some(description) = &template.description {
        eprintln!("{}", description);
    }
    if let Some(content) = &template.content {
        println!("{}", content);
    }
    Ok(())
}

async fn create(ctx: &Context, template: &NewTemplate) -> Result<()> {
    let created = require_session(settle(ctx.client.create_template(template).await)?)?;
    if ctx.json {
        return print_json(&created);
    }
    println!("{}", created.id);
    Ok(())
}

async fn update(ctx: &Context, id: &str, changes: &TemplateChanges) -> Result<()> {
    let updated = require_session(settle(ctx.client.update_template(id, changes).await)?)?;
    if ctx.json {
        return print_json(&updated);
    }
    Ok(())
}

async fn delete(ctx: &Context, id: &str) -> Result<()> {
    match settle(ctx.client.delete_template(id).await)? {
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
