//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// meetnotes - Summarize meeting transcripts with AI and share the result
#[derive(Parser, Debug)]
#[command(name = "meetnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the prompt that would be sent for a transcript
    Prompt {
        #[command(flatten)]
        input: TranscriptArgs,
    },

    /// Generate a summary for a transcript
    Summarize {
        #[command(flatten)]
        input: TranscriptArgs,

        /// Open the generated summary in $EDITOR before continuing
        #[arg(short, long)]
        edit: bool,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Email the summary to this recipient
        #[arg(short, long, value_name = "EMAIL")]
        share: Option<String>,
    },

    /// Send a saved summary to a recipient
    Share {
        /// Recipient email address
        #[arg(short, long, value_name = "EMAIL")]
        to: String,

        /// Summary file (reads stdin when omitted or '-')
        #[arg(short, long)]
        summary: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
pub struct TranscriptArgs {
    /// Transcript file (reads stdin when omitted or '-')
    #[arg(short, long)]
    pub transcript: Option<PathBuf>,

    /// Steering instructions for the summary
    #[arg(short, long)]
    pub instructions: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
