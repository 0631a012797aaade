//! Share module for meetnotes
//!
//! Dispatches a finished summary to a recipient through a pluggable
//! [`MailTransport`]. One attempt per call, no retry.

mod relay;

pub use relay::{RelayMailer, SimulatedMailer};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Settings;
use crate::llm::InvalidInput;
use crate::{MeetnotesError, Result};

/// Delivers summary text to a recipient.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, recipient: &str, content: &str) -> anyhow::Result<()>;
}

/// Summary text addressed to a recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub summary: String,
    pub recipient: String,
}

impl ShareRequest {
    pub fn new(summary: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            recipient: recipient.into(),
        }
    }

    fn validate(&self) -> std::result::Result<(), InvalidInput> {
        if self.summary.trim().is_empty() {
            return Err(InvalidInput::EmptySummary);
        }
        if self.recipient.trim().is_empty() {
            return Err(InvalidInput::EmptyRecipient);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareFailure {
    #[error("{0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("transport rejected the message: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Sent,
    Failed(ShareFailure),
}

impl ShareOutcome {
    pub fn into_result(self) -> Result<()> {
        match self {
            ShareOutcome::Sent => Ok(()),
            ShareOutcome::Failed(failure) => Err(MeetnotesError::from(failure)),
        }
    }
}

pub struct ShareDispatcher {
    transport: Box<dyn MailTransport>,
}

impl ShareDispatcher {
    pub fn new(transport: Box<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Validate the request and hand it to the transport once.
    pub async fn send(&self, request: ShareRequest) -> ShareOutcome {
        if let Err(invalid) = request.validate() {
            warn!(error = %invalid, "Rejecting share request");
            return ShareOutcome::Failed(invalid.into());
        }

        match self
            .transport
            .send(request.recipient.trim(), &request.summary)
            .await
        {
            Ok(()) => {
                info!(recipient = request.recipient.trim(), "Summary sent");
                ShareOutcome::Sent
            }
            Err(e) => {
                warn!(recipient = request.recipient.trim(), error = %e, "Failed to send summary");
                ShareOutcome::Failed(ShareFailure::Transport(format!("{e:#}")))
            }
        }
    }
}

/// Build a share dispatcher from runtime settings.
pub fn build_dispatcher(settings: &Settings) -> Result<ShareDispatcher> {
    let transport: Box<dyn MailTransport> =
        match settings.share.transport.to_lowercase().as_str() {
            "simulated" => Box::new(SimulatedMailer::new(settings.share.simulated_delay())),
            "relay" => Box::new(RelayMailer::from_settings(settings)?),
            other => {
                return Err(MeetnotesError::Config(format!(
                    "Unsupported share.transport '{}'. Supported transports: simulated, relay",
                    other
                )))
            }
        };

    Ok(ShareDispatcher::new(transport))
}
