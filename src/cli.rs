use crate::config::Config;
use crate::manager::{self, Backend};
use crate::utils::error::AppResult;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prompt-gallery")]
#[command(about = "A prompt gallery with a REST API and a terminal client")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "URL",
        global = true,
        help = "Talk to a running server instead of the local prompt file"
    )]
    pub server: Option<String>,

    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub async fn execute(self, config: Config, server: Option<String>) -> AppResult<()> {
        match self {
            Commands::Serve(args) => manager::handle_serve_command(config, &args).await,
            Commands::Config(args) => manager::handle_config_command(&config, args.command),
            command => {
                let backend = Backend::connect(&config, server.as_deref()).await?;
                command.run(&backend).await
            }
        }
    }

    async fn run(self, backend: &Backend) -> AppResult<()> {
        match self {
            Commands::List(args) => manager::handle_list_command(backend, &args).await?,
            Commands::New(args) => {
                manager::handle_new_command(backend, &args).await?;
            }
            Commands::Show(args) => {
                manager::handle_show_command(backend, &args).await?;
            }
            Commands::Edit(args) => {
                manager::handle_edit_command(backend, &args).await?;
            }
            Commands::Fav(args) => {
                manager::handle_fav_command(backend, &args).await?;
            }
            Commands::Use(args) => {
                manager::handle_use_command(backend, &args).await?;
            }
            Commands::Delete(args) => manager::handle_delete_command(backend, &args).await?,
            Commands::Serve(_) | Commands::Config(_) => {}
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the REST server
    Serve(ServeArgs),

    /// List prompts, optionally filtered
    List(ListArgs),

    /// Create a new prompt
    New(NewArgs),

    /// Show prompt details
    Show(IdArgs),

    /// Edit an existing prompt
    Edit(EditArgs),

    /// Set or clear the favorite flag
    Fav(FavArgs),

    /// Record a use of a prompt and print its content
    Use(IdArgs),

    /// Delete a prompt
    Delete(DeleteArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, help = "Override the configured host")]
    pub host: Option<String>,

    #[arg(short, long, help = "Override the configured port")]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short = 'q', long, help = "Case-insensitive match on title, content, tags or category")]
    pub search: Option<String>,

    #[arg(short = 'c', long)]
    pub category: Option<String>,

    #[arg(short, long = "tag", help = "Required tag, repeatable")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub favorites: bool,

    #[arg(short, long, value_enum, default_value_t = ListFormat::Simple)]
    pub format: ListFormat,

    #[arg(long, help = "Also show favorites and most used")]
    pub highlights: bool,

    #[arg(long)]
    pub stats: bool,

    #[arg(long, help = "Show all available tags")]
    pub all_tags: bool,
}

#[derive(Args)]
pub struct NewArgs {
    #[arg(short = 'T', long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    #[arg(short = 'c', long)]
    pub category: Option<String>,

    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub favorite: bool,
}

#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Prompt ID")]
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(help = "Prompt ID")]
    pub id: String,

    #[arg(short = 'T', long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(short = 'c', long)]
    pub category: Option<String>,

    #[arg(short, long = "tag")]
    pub tags: Option<Vec<String>>,

    #[arg(long, help = "Send a full replacement; omitted fields reset to defaults")]
    pub replace: bool,
}

#[derive(Args)]
pub struct FavArgs {
    #[arg(help = "Prompt ID")]
    pub id: String,

    #[arg(long, help = "Clear the flag instead of setting it")]
    pub off: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Prompt ID")]
    pub id: String,

    #[arg(short, long)]
    pub force: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq)]
pub enum ListFormat {
    Simple,
    Detailed,
    Json,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,
}
