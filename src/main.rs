//! meetnotes - Summarize meeting transcripts with AI and share the result
//!
//! Entry point for the meetnotes CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meetnotes::cli::{Cli, Commands};
use meetnotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        meetnotes::cli::completions::print(shell);
        return Ok(());
    }

    // Load configuration only for runtime commands.
    let settings = Settings::load()?;

    // Initialize logging
    let default_level = if cli.verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command {
        Commands::Prompt { input } => {
            meetnotes::cli::commands::render_prompt(&settings, input)?;
        }
        Commands::Summarize {
            input,
            edit,
            output,
            share,
        } => {
            meetnotes::cli::commands::summarize(&settings, input, edit, output, share).await?;
        }
        Commands::Share { to, summary } => {
            meetnotes::cli::commands::share_summary(&settings, &to, summary).await?;
        }
        Commands::Config(config_cmd) => {
            meetnotes::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
