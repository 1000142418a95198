// Configuration operations

use crate::cli::ConfigCommands;
use crate::config::{Config, StorageBackend};
use crate::utils::error::AppResult;

pub fn handle_config_command(config: &Config, command: Option<ConfigCommands>) -> AppResult<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(config),
        Some(ConfigCommands::Path) => {
            println!("{}", Config::config_file_path().display());
            Ok(())
        }
        None => handle_config_help(),
    }
}

fn handle_show_command(config: &Config) -> AppResult<()> {
    println!("⚙️  Prompt Gallery Configuration");
    println!("===============================");

    println!("Server:");
    println!("  Address: {}", config.bind_address());
    println!("  CORS: {}", config.server.enable_cors);

    println!("Storage:");
    let backend = match config.storage.backend {
        StorageBackend::File => "file",
        StorageBackend::Memory => "memory",
    };
    println!("  Backend: {}", backend);
    println!("  Prompt file: {}", config.storage.prompt_file.display());

    println!("Logging:");
    println!("  Level: {}", config.logging.level);

    println!("\nConfig file: {}", Config::config_file_path().display());
    Ok(())
}

fn handle_config_help() -> AppResult<()> {
    println!("Configuration commands:");
    println!("  prompt-gallery config show   Show current configuration");
    println!("  prompt-gallery config path   Print the configuration file path");
    println!("\nEnvironment overrides: PROMPT_GALLERY_HOST, PROMPT_GALLERY_PORT,");
    println!("PROMPT_GALLERY_STORAGE, PROMPT_GALLERY_PROMPT_FILE, PROMPT_GALLERY_LOG");
    Ok(())
}
