//! Fulcrum HTTP client
//!
//! A type-safe HTTP client layer for the services the CFM agent talks to:
//! the Fulcrum Core control plane (job queue, agent status, metrics) and the
//! process manager (deployments).
//!
//! The control-plane surface is expressed as the [`FulcrumApi`] capability
//! trait so the job processor and the management endpoint receive an
//! `Arc<dyn FulcrumApi>` and can be tested against in-memory doubles. The
//! [`HttpFulcrumClient`] implementation attaches the current bearer
//! credential, held in a [`TokenCell`], to every request; rotating the
//! credential takes effect on the next request without a restart.
//!
//! # Example
//!
//! ```no_run
//! use fulcrum_client::{FulcrumApi, HttpFulcrumClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fulcrum_client::ClientError> {
//!     let client = HttpFulcrumClient::new("http://localhost:8080", "agent-token");
//!
//!     let jobs = client.pending_jobs().await?;
//!     println!("{} pending job(s)", jobs.len());
//!     Ok(())
//! }
//! ```

mod api;
mod deployment;
pub mod error;
mod token;

// Re-export commonly used types
pub use deployment::{DeploymentApi, HttpDeploymentClient};
pub use error::{ClientError, Result};
pub use token::TokenCell;

use async_trait::async_trait;
use fulcrum_core::domain::job::Job;
use fulcrum_core::domain::metric::MetricEntry;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Per-call timeout. There is no cancellation of an issued request; this
/// timeout is the sole bound on a hung call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability contract for all communication with the Fulcrum Core API.
///
/// Every operation is a single authenticated network call; none of them
/// retry. Failures surface as [`ClientError`] values so callers can
/// distinguish transport, protocol, and decode problems.
#[async_trait]
pub trait FulcrumApi: Send + Sync {
    /// Reports the agent's own status; used for liveness reporting.
    async fn update_agent_status(&self, status: &str) -> Result<()>;

    /// Fetches the agent's attribute map. Informational only.
    async fn agent_info(&self) -> Result<HashMap<String, serde_json::Value>>;

    /// Fetches pending jobs in server-determined order.
    ///
    /// An empty list is a valid, non-error result. Callers must not reorder
    /// or filter the sequence.
    async fn pending_jobs(&self) -> Result<Vec<Job>>;

    /// Claims a job for processing.
    ///
    /// This is the exclusivity checkpoint: the call fails with a protocol
    /// error if the queue forbids the transition (e.g. the job was already
    /// claimed).
    async fn claim_job(&self, job_id: &str) -> Result<()>;

    /// Marks a claimed job completed, attaching an opaque result payload.
    async fn complete_job(&self, job_id: &str, resources: serde_json::Value) -> Result<()>;

    /// Marks a claimed job failed with a human-readable diagnostic.
    async fn fail_job(&self, job_id: &str, error_message: &str) -> Result<()>;

    /// Appends a metric entry. Fire-and-forget; idempotency is the caller's
    /// concern, not guaranteed here.
    async fn report_metric(&self, entry: &MetricEntry) -> Result<()>;

    /// Atomically replaces the bearer credential used by all subsequent
    /// calls. Calls already in flight keep the credential they started with.
    fn update_token(&self, token: &str);
}

/// HTTP implementation of [`FulcrumApi`]
#[derive(Debug)]
pub struct HttpFulcrumClient {
    /// Base URL of Fulcrum Core (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Current agent credential
    token: TokenCell,
}

impl HttpFulcrumClient {
    /// Create a new Fulcrum Core client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Fulcrum Core API
    /// * `token` - The initial agent credential from configuration
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");
        Self::with_client(base_url, token, client)
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: TokenCell::new(token),
        }
    }

    /// Get the base URL of the Fulcrum Core API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn bearer_token(&self) -> String {
        self.token.get()
    }

    pub(crate) fn token_cell(&self) -> &TokenCell {
        &self.token
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize the JSON body
///
/// Checks the status code and returns a protocol error if the request
/// failed, or a decode error if the body does not parse.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ClientError::protocol(status.as_u16(), body));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(format!("failed to decode response body: {e}")))
}

/// Handle an API response that carries no interesting body
pub(crate) async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ClientError::protocol(status.as_u16(), body));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpFulcrumClient::new("http://localhost:8080", "token");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = HttpFulcrumClient::new("http://localhost:8080/", "token");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_holds_initial_token() {
        let client = HttpFulcrumClient::new("http://localhost:8080", "initial");
        assert_eq!(client.bearer_token(), "initial");
    }
}
