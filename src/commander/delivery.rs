use std::sync::{Mutex, PoisonError};

use http::header::CONTENT_TYPE;
use http::StatusCode;
use log::{debug, info};
use reqwest::Client;
use slackcommander_model::CommandResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Cannot serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Cannot post response to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} rejected response with {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Cannot read reply from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Payload that would have been posted in dry run mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDelivery {
    pub url: String,
    pub response: CommandResponse,
}

/// Posts command responses to the callback urls of async commands.
pub struct Delivery {
    client: Client,
    dry_run: bool,
    recorded: Mutex<Vec<RecordedDelivery>>,
}

impl Delivery {
    pub fn new(dry_run: bool) -> Self {
        Self::with_client(Client::new(), dry_run)
    }

    pub fn with_client(client: Client, dry_run: bool) -> Self {
        Self {
            client,
            dry_run,
            recorded: Default::default(),
        }
    }

    /// HTTP client shared with other outbound callers.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub async fn deliver(&self, response: &CommandResponse, url: &str) -> Result<(), DeliveryError> {
        let payload = serde_json::to_vec(response)?;
        if self.dry_run {
            info!("Dry run, not posting to {url}: {}", String::from_utf8_lossy(&payload));
            self.recorded
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(RecordedDelivery {
                    url: url.to_string(),
                    response: response.clone(),
                });
            return Ok(());
        }

        debug!("Posting {} bytes to {url}", payload.len());
        let reply = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|source| DeliveryError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = reply.status();
        let body = reply.text().await.map_err(|source| DeliveryError::Body {
            url: url.to_string(),
            source,
        })?;
        debug!("{url} replied with {status}: {body}");
        if status.as_u16() >= 400 {
            return Err(DeliveryError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }
        Ok(())
    }

    /// Payloads recorded in dry run mode, oldest first.
    pub fn recorded(&self) -> Vec<RecordedDelivery> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
