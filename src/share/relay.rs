//! Mail transports.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::share::MailTransport;
use crate::{MeetnotesError, Result};

/// Pretends to deliver after a fixed delay and always succeeds.
pub struct SimulatedMailer {
    delay: Duration,
}

impl SimulatedMailer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl MailTransport for SimulatedMailer {
    async fn send(&self, recipient: &str, content: &str) -> anyhow::Result<()> {
        debug!(
            recipient,
            bytes = content.len(),
            "Simulating delivery for {}ms",
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Posts the message to an HTTP mail relay that performs the actual delivery.
pub struct RelayMailer {
    http: Client,
    url: String,
}

impl RelayMailer {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let url = settings.share.relay_url.trim().to_string();
        if url.is_empty() {
            return Err(MeetnotesError::Config(
                "share.relay_url must be set when share.transport is 'relay'".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(settings.share.request_timeout())
            .build()
            .map_err(|e| MeetnotesError::Config(format!("Failed to build relay HTTP client: {e}")))?;

        Ok(Self { http, url })
    }
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    email: &'a str,
    content: &'a str,
    sent_at: String,
}

#[async_trait]
impl MailTransport for RelayMailer {
    async fn send(&self, recipient: &str, content: &str) -> anyhow::Result<()> {
        let message = RelayMessage {
            email: recipient,
            content,
            sent_at: Utc::now().to_rfc3339(),
        };

        self.http
            .post(&self.url)
            .json(&message)
            .send()
            .await
            .context("Mail relay request failed")?
            .error_for_status()
            .context("Mail relay returned an error status")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn relay_settings(url: &str) -> Settings {
        let mut settings = Settings::default();
        settings.share.transport = "relay".to_string();
        settings.share.relay_url = url.to_string();
        settings
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_mailer_waits_then_succeeds() {
        let mailer = SimulatedMailer::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        mailer.send("a@b.com", "summary").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[test]
    fn relay_requires_url() {
        let err = match RelayMailer::from_settings(&relay_settings("  ")) {
            Ok(_) => panic!("expected missing relay url error"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("share.relay_url"));
    }

    #[tokio::test]
    async fn relay_posts_recipient_and_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/send-email")
            .match_body(Matcher::PartialJson(json!({
                "email": "a@b.com",
                "content": "**Key Takeaways**"
            })))
            .with_status(202)
            .create_async()
            .await;

        let mailer =
            RelayMailer::from_settings(&relay_settings(&format!("{}/api/send-email", server.url())))
                .unwrap();

        mailer.send("a@b.com", "**Key Takeaways**").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn relay_error_status_is_rejection() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/send-email")
            .with_status(502)
            .create_async()
            .await;

        let mailer =
            RelayMailer::from_settings(&relay_settings(&format!("{}/api/send-email", server.url())))
                .unwrap();

        let err = mailer.send("a@b.com", "summary").await.unwrap_err();
        assert!(format!("{err:#}").contains("Mail relay returned an error status"));
    }
}
