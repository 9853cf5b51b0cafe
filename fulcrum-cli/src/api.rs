//! Admin API client
//!
//! Thin HTTP wrapper for the demo commands: admin-authenticated posts to
//! Fulcrum Core, plain posts to the process manager and the agent
//! management API.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;

/// HTTP client for the demo scenarios
pub struct AdminClient {
    fulcrum_core_url: String,
    pmanager_url: String,
    agent_url: String,
    admin_token: String,
    client: Client,
}

impl AdminClient {
    /// Create a client from the CLI configuration
    pub fn new(config: &Config) -> Self {
        Self {
            fulcrum_core_url: config.fulcrum_core_url.trim_end_matches('/').to_string(),
            pmanager_url: config.pmanager_url.trim_end_matches('/').to_string(),
            agent_url: config.agent_url.trim_end_matches('/').to_string(),
            admin_token: config.admin_token.clone(),
            client: Client::new(),
        }
    }

    /// POST to Fulcrum Core with the admin bearer token; returns the decoded
    /// JSON response body.
    pub async fn post_to_fulcrum_core<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.fulcrum_core_url, endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.admin_token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("failed to reach Fulcrum Core at {url}"))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("request to {url} failed with status {status}: {text}");
        }

        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).with_context(|| format!("failed to parse response from {url}"))
    }

    /// POST to the process manager; the demo only cares about success.
    pub async fn post_to_pmanager<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<()> {
        let url = format!("{}/{}", self.pmanager_url, endpoint);
        self.post_expecting_success(&url, body).await
    }

    /// POST to the CFM agent management API.
    pub async fn post_to_agent<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<()> {
        let url = format!("{}/{}", self.agent_url, endpoint);
        self.post_expecting_success(&url, body).await
    }

    async fn post_expecting_success<T: Serialize>(&self, url: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("request to {url} failed with status {status}: {text}");
        }

        Ok(())
    }
}
