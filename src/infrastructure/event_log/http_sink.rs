//! Remote log collector sink.

use super::credentials::CredentialProvider;
use super::event::LogEvent;
use super::sink::{EventSink, SinkError};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, warn};

/// Posts events as JSON to a collector URL with a bearer token.
///
/// A 401 answer triggers one credential refresh and one resend.
pub struct HttpEventSink {
    client: reqwest::Client,
    url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpEventSink {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            credentials,
        }
    }

    async fn post(&self, event: &LogEvent, token: &str) -> Result<reqwest::Response, SinkError> {
        Ok(self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(event)
            .send()
            .await?)
    }
}

#[async_trait]
impl EventSink for HttpEventSink {
    async fn send(&self, event: &LogEvent) -> Result<(), SinkError> {
        let credential = self.credentials.current().await?;
        let mut response = self.post(event, credential.token()).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Event log token rejected, refreshing and retrying");
            let credential = self.credentials.refresh().await?;
            response = self.post(event, credential.token()).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(package = %event.package, "Event delivered");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.credentials.current().await.is_ok()
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
