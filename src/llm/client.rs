//! Retrying generation client.
//!
//! One `generate` call runs at most `max_attempts` sequential requests against
//! a [`GenerationTransport`], sleeping `base_delay * 2^attempt` between them.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm::prompts::RenderedPrompt;
use crate::MeetnotesError;

/// Remote call that produces generated text for a prompt.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn generate_content(&self, prompt: &RenderedPrompt) -> Result<String, RemoteFailure>;
}

/// Delay between attempts. Swapped for a fake in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A failed attempt. Every variant is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("response did not contain generated text")]
    MissingText,
}

/// Terminal failure of a `generate` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("exhausted retries")]
    ExhaustedRetries {
        attempts: u32,
        last_error: RemoteFailure,
    },

    #[error("a generation request is already in flight")]
    Busy,
}

/// Result of one `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(String),
    Failure(GenerationFailure),
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }

    pub fn into_result(self) -> crate::Result<String> {
        match self {
            GenerationOutcome::Success(text) => Ok(text),
            GenerationOutcome::Failure(failure) => Err(MeetnotesError::from(failure)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` below one is treated as one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the next request, after `failed_attempts` failures.
    pub fn delay_for(&self, failed_attempts: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(failed_attempts))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Idle,
    InFlight,
}

pub struct GenerationClient {
    transport: Box<dyn GenerationTransport>,
    sleeper: Box<dyn Sleeper>,
    policy: RetryPolicy,
    state: Mutex<ClientState>,
}

impl GenerationClient {
    pub fn new(transport: Box<dyn GenerationTransport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper: Box::new(TokioSleeper),
            policy,
            state: Mutex::new(ClientState::Idle),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn state(&self) -> ClientState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate text for `prompt`, retrying retryable failures with
    /// exponential backoff. Always resolves to an outcome.
    ///
    /// A call made while another is still running returns
    /// [`GenerationFailure::Busy`] without contacting the endpoint.
    pub async fn generate(&self, prompt: &RenderedPrompt) -> GenerationOutcome {
        let Some(_in_flight) = self.try_begin() else {
            warn!("Summary generation already in flight, rejecting request");
            return GenerationOutcome::Failure(GenerationFailure::Busy);
        };

        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            debug!(attempt = attempt + 1, max_attempts, "Requesting summary");

            let error = match self.transport.generate_content(prompt).await {
                Ok(text) => {
                    info!(attempts = attempt + 1, "Summary generated");
                    return GenerationOutcome::Success(text);
                }
                Err(error) => error,
            };

            attempt += 1;
            if attempt >= max_attempts {
                warn!(attempts = attempt, error = %error, "Giving up on summary generation");
                return GenerationOutcome::Failure(GenerationFailure::ExhaustedRetries {
                    attempts: attempt,
                    last_error: error,
                });
            }

            let delay = self.policy.delay_for(attempt);
            warn!(
                attempt,
                error = %error,
                "Summary request failed, retrying in {}s",
                delay.as_secs_f64()
            );
            self.sleeper.sleep(delay).await;
        }
    }

    fn try_begin(&self) -> Option<InFlight<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == ClientState::InFlight {
            return None;
        }
        *state = ClientState::InFlight;
        Some(InFlight { state: &self.state })
    }
}

/// Resets the client to `Idle` when the call finishes or is dropped.
struct InFlight<'a> {
    state: &'a Mutex<ClientState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = ClientState::Idle;
    }
}
