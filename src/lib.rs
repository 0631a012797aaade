//! meetnotes - Turn meeting transcripts into AI-generated summaries and share them
//!
//! The library core is three small pieces: a prompt builder, a retrying
//! generation client and a share dispatcher. The CLI in `cli` wires them up.

pub mod cli;
pub mod config;
pub mod llm;
pub mod share;

use thiserror::Error;

/// Main error type for meetnotes
#[derive(Error, Debug)]
pub enum MeetnotesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] llm::InvalidInput),

    #[error("Generation failed: {0}")]
    Generation(#[from] llm::GenerationFailure),

    #[error("Share failed: {0}")]
    Share(#[from] share::ShareFailure),
}

pub type Result<T> = std::result::Result<T, MeetnotesError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "meetnotes";
