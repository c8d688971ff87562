//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use shelf_core::config::{self, Config, Variant};
use shelf_core::logging;
use tracing::debug;

mod commands;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(version)]
#[command(about = "Library and book review landing page")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Landing page copy: library or book-review (overrides config)
    #[arg(long, value_name = "VARIANT", global = true)]
    variant: Option<Variant>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print whether a login identifier is read as an email or a username
    Classify {
        /// Identifier exactly as it would be typed (not trimmed)
        identifier: String,
    },

    /// Search the catalog by title, author or ISBN
    Search {
        query: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the average rating and reviews of a book
    Reviews {
        isbn: String,

        /// Print the rating and reviews as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let (config, _log_guard) = load_config(cli.variant)?;
            commands::landing::run(&config)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Some(Commands::Classify { identifier }) => {
            commands::classify::run(&identifier);
            Ok(())
        }
        Some(Commands::Search { query, json }) => {
            let (config, _log_guard) = load_config(cli.variant)?;
            commands::search::run(&config, &query, json)
        }
        Some(Commands::Reviews { isbn, json }) => {
            let (config, _log_guard) = load_config(cli.variant)?;
            commands::reviews::run(&config, &isbn, json)
        }
    }
}

/// Loads config, applies the CLI override and starts file logging.
///
/// A logging failure is reported and otherwise ignored.
fn load_config(
    variant: Option<Variant>,
) -> Result<(Config, Option<logging::WorkerGuard>)> {
    let config_path = config::paths::config_path();
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("load config from {}", config_path.display()))?;
    if let Some(variant) = variant {
        config.variant = variant;
    }

    let guard = match logging::init_file_logging(&config.log_path()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };
    debug!(path = %config_path.display(), variant = %config.variant, "config loaded");
    Ok((config, guard))
}
