use anyhow::Result;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, fmt};

use prompt_gallery::cli::{Cli, Commands};
use prompt_gallery::config::Config;
use prompt_gallery::utils::report_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Ensure configuration exists and load it
    let config = match &cli.config {
        Some(config_path) => Config::load_custom(config_path)?,
        None => {
            Config::ensure_config_exists()?;
            Config::load()?
        }
    };
    let config = config.with_env_overrides()?;

    // Client commands stay quiet unless asked; the server logs at the configured level
    let level = if cli.debug {
        "debug"
    } else if matches!(cli.command, Commands::Serve(_)) {
        config.logging.level.as_str()
    } else {
        "warn"
    };
    init_logging(level);
    debug!("prompt-gallery v{}", prompt_gallery::VERSION);

    if let Err(e) = cli.command.execute(config, cli.server).await {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(level: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    fmt()
        .with_env_filter(log_filter(level, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG`, when set and valid, takes over entirely; otherwise the
/// configured level applies.
fn log_filter(level: &str, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return filter;
    }

    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    EnvFilter::default().add_directive(level.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_prefers_rust_log() {
        let filter = log_filter("warn", Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = log_filter("warn", Some("prompt_gallery=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_log_filter_falls_back_to_configured_level() {
        assert_eq!(log_filter("warn", None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter("ERROR", Some("  ")).max_level_hint(), Some(LevelFilter::ERROR));
        assert_eq!(log_filter("loud", None).max_level_hint(), Some(LevelFilter::INFO));
    }
}
