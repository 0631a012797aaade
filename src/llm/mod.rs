//! LLM module for meetnotes
//!
//! Renders the summary prompt and runs it against Gemini with retry.

mod client;
mod gemini;
mod prompts;

pub use client::{
    ClientState, GenerationClient, GenerationFailure, GenerationOutcome, GenerationTransport,
    RemoteFailure, RetryPolicy, Sleeper, TokioSleeper,
};
pub use gemini::GeminiClient;
pub use prompts::{build_summary_prompt, InvalidInput, RenderedPrompt, DEFAULT_INSTRUCTIONS};

use crate::config::Settings;
use crate::{MeetnotesError, Result};

/// Build a generation client from runtime settings.
pub fn build_client(settings: &Settings) -> Result<GenerationClient> {
    let transport: Box<dyn GenerationTransport> =
        match settings.llm.provider.to_lowercase().as_str() {
            "gemini" => Box::new(GeminiClient::from_settings(settings)?),
            other => {
                return Err(MeetnotesError::Config(format!(
                    "Unsupported llm.provider '{}'. Supported providers: gemini",
                    other
                )))
            }
        };

    Ok(GenerationClient::new(transport, settings.llm.retry_policy()))
}
