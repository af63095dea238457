mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::common::{next_step_hint, Context};
use cli::{Cli, Commands};
use renderdesk::error::{JsonError, RenderdeskError, Result};
use renderdesk::guard::Access;
use renderdesk::navigate::Destination;

const LOG_ENV: &str = "RENDERDESK_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let ctx = match Context::load(cli.json, cli.yes) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e, cli.json, false),
    };

    if let Err(e) = run(&ctx, &cli.command).await {
        fail(&e, ctx.json, ctx.notifier.error_shown());
    }
}

async fn run(ctx: &Context, command: &Commands) -> Result<()> {
    let page = command.page();
    if ctx.client.enter(page)? == Access::Redirected {
        return Err(RenderdeskError::NotLoggedIn);
    }

    match command {
        Commands::Status => cli::status::run(ctx).await,
        Commands::Login { email, password } => {
            cli::login::run(ctx, email.as_deref(), password.as_deref()).await
        }
        Commands::Register {
            email,
            password,
            confirm_password,
        } => {
            cli::register::run(
                ctx,
                email.as_deref(),
                password.as_deref(),
                confirm_password.as_deref(),
            )
            .await
        }
        Commands::Logout => cli::logout::run(ctx),
        Commands::Whoami => cli::whoami::run(ctx).await,
        Commands::Templates { command } => cli::templates::run(ctx, command).await,
        Commands::Keys { command } => cli::keys::run(ctx, command).await,
        Commands::Render {
            template_id,
            data,
            data_file,
            output,
        } => {
            cli::render::run(
                ctx,
                template_id,
                data.as_deref(),
                data_file.as_deref(),
                output.as_deref(),
            )
            .await
        }
        Commands::Config { command } => cli::config::run(ctx, command),
    }?;

    // A protected command that ended on the login page lost its session.
    if !page.is_public() && ctx.session_rejected() {
        return Err(RenderdeskError::SessionExpired);
    }

    if !ctx.json {
        if let Some(Destination::Page(next)) = ctx.navigation.take().map(|n| n.destination) {
            if let Some(hint) = next_step_hint(next) {
                eprintln!("Next: {}", hint);
            }
        }
    }
    Ok(())
}

fn fail(e: &RenderdeskError, json: bool, already_shown: bool) -> ! {
    if json {
        match serde_json::to_string(&JsonError::from_error(e)) {
            Ok(s) => eprintln!("{}", s),
            Err(_) => eprintln!("Error: {}", e),
        }
    } else if !already_shown {
        eprintln!("Error: {}", e);
    }
    std::process::exit(e.exit_code());
}
