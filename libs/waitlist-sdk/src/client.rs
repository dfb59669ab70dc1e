//! Relay client implementation.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;
use serde::Deserialize;
use waitlist_types::{ErrorResponse, ExternalRecordId, WaitlistEntry};

use crate::{error::RelayError, ledger::LocalLedger};

/// Reason reported when the relay's error body carries nothing usable.
const GENERIC_FAILURE: &str = "Failed to add to waitlist";

/// Path of the sign-up function below a hosted relay's base URL.
const FUNCTION_PATH: &str = "functions/v1/add-to-waitlist";

/// The part of a 2xx relay body the client relies on.
#[derive(Deserialize)]
struct CreatedRecord {
    id: ExternalRecordId,
}

/// Configuration for the relay client.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Full URL of the sign-up endpoint
    pub endpoint: Url,

    /// Public (anon) key sent as the bearer credential
    pub anon_key: String,

    /// Total request timeout. `None` leaves the transport defaults in place.
    pub request_timeout: Option<Duration>,
}

impl RelayConfig {
    /// Derive the endpoint from a hosted relay base URL
    /// (`<base>/functions/v1/add-to-waitlist`).
    pub fn from_base_url(base_url: &str, anon_key: &str) -> Result<Self, RelayError> {
        if base_url.is_empty() {
            return Err(RelayError::Config("relay URL is required".into()));
        }

        let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), FUNCTION_PATH)
            .parse::<Url>()
            .map_err(|e| RelayError::Config(format!("invalid relay URL: {e}")))?;

        Ok(Self {
            endpoint,
            anon_key: anon_key.to_string(),
            request_timeout: None,
        })
    }

    /// Read `WAITLIST_RELAY_URL` and `WAITLIST_ANON_KEY`.
    pub fn from_env() -> Result<Self, RelayError> {
        let base_url = std::env::var("WAITLIST_RELAY_URL").unwrap_or_default();
        let anon_key = std::env::var("WAITLIST_ANON_KEY").unwrap_or_default();
        Self::from_base_url(&base_url, &anon_key)
    }
}

/// What a successful submission hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub id: ExternalRecordId,

    /// Local position estimate after the sign-up was recorded.
    pub position: Option<usize>,
}

/// Anything that can submit a waitlist entry on the flow's behalf.
#[async_trait]
pub trait WaitlistSubmitter: Send + Sync {
    async fn submit(&self, entry: &WaitlistEntry) -> Result<SubmitReceipt, RelayError>;
}

/// Posts sign-ups to the relay and records successes in the local ledger.
pub struct RelayClient {
    config: RelayConfig,
    http_client: reqwest::Client,
    ledger: LocalLedger,
}

impl RelayClient {
    /// Create a new relay client.
    ///
    /// Fails when the anon key is empty; nothing is sent in that case.
    pub fn new(config: RelayConfig, ledger: LocalLedger) -> Result<Self, RelayError> {
        if config.anon_key.is_empty() {
            return Err(RelayError::Config("anon key is required".into()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| RelayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
            ledger,
        })
    }

    pub fn ledger(&self) -> &LocalLedger {
        &self.ledger
    }

    /// Submit one entry. Exactly one request is made; there is no retry.
    ///
    /// On success the entry is appended to the local ledger. A ledger
    /// failure is logged and does not affect the result.
    pub async fn submit(&self, entry: &WaitlistEntry) -> Result<SubmitReceipt, RelayError> {
        let response = self
            .http_client
            .post(self.config.endpoint.clone())
            .bearer_auth(&self.config.anon_key)
            .json(entry)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = failure_reason(&body);
            tracing::error!(status = status.as_u16(), reason = %reason, "Relay rejected submission");
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        let body: CreatedRecord = response
            .json()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.to_string()))?;

        tracing::info!(id = %body.id, "Successfully added to waitlist");

        if let Err(err) = self.ledger.record_submission(body.id.clone(), entry) {
            tracing::warn!(error = %err, "Failed to record submission in local ledger");
        }

        Ok(SubmitReceipt {
            id: body.id,
            position: self.ledger.estimated_position(),
        })
    }
}

#[async_trait]
impl WaitlistSubmitter for RelayClient {
    async fn submit(&self, entry: &WaitlistEntry) -> Result<SubmitReceipt, RelayError> {
        RelayClient::submit(self, entry).await
    }
}

/// Prefer the relay's `details`, then its `error`, then a generic reason.
fn failure_reason(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|err| {
            err.details
                .filter(|d| !d.is_empty())
                .or_else(|| Some(err.error).filter(|e| !e.is_empty()))
        })
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
