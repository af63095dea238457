pub mod common;
pub mod config;
pub mod json_output;
pub mod keys;
pub mod login;
pub mod logout;
pub mod register;
pub mod render;
pub mod status;
pub mod templates;
pub mod terminal;
pub mod whoami;

use clap::{Parser, Subcommand};

use renderdesk::navigate::Page;

#[derive(Parser)]
#[command(
    name = "renderdesk",
    version,
    about = "Terminal client for the PDF template rendering API"
)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the backend and the local session
    Status,

    /// Sign in and store the session tokens
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted if omitted)
        #[arg(long, env = "RENDERDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
        /// Password confirmation (prompted if omitted)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the account the session belongs to
    Whoami,

    /// Manage document templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },

    /// Manage API keys
    Keys {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// Render a template to PDF
    Render {
        /// Template id
        template_id: String,
        /// Render data as a JSON object
        #[arg(long, conflicts_with = "data_file")]
        data: Option<String>,
        /// Read render data from a JSON file ('-' for stdin)
        #[arg(long)]
        data_file: Option<String>,
        /// Output file or directory (default: configured output dir)
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List templates
    List,
    /// Show a template with its content
    Show {
        id: String,
    },
    /// Create a template
    Create {
        /// Template name
        #[arg(long)]
        name: String,
        /// HTML content
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        content: Option<String>,
        /// Read HTML content from a file ('-' for stdin)
        #[arg(long)]
        file: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a template
    Update {
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New HTML content
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        /// Read new HTML content from a file ('-' for stdin)
        #[arg(long)]
        file: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a template
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum KeyCommands {
    /// List API keys
    List,
    /// Issue a new API key (shown once)
    Create {
        /// Label for the key
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Revoke an API key
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}

impl Commands {
    /// The page this command stands for, for the session guard.
    pub fn page(&self) -> Page {
        match self {
            Commands::Status | Commands::Config { .. } => Page::Landing,
            Commands::Login { .. } | Commands::Logout => Page::Login,
            Commands::Register { .. } => Page::Register,
            Commands::Whoami => Page::Dashboard,
            Commands::Templates {
                command: TemplateCommands::Create { .. },
            } => Page::NewTemplate,
            Commands::Templates { .. } => Page::Templates,
            Commands::Keys { .. } => Page::ApiKeys,
            Commands::Render { .. } => Page::Render,
        }
    }
}
