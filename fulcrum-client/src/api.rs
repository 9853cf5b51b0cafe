//! Fulcrum Core API endpoints
//!
//! Implements the [`FulcrumApi`] capability set over HTTP. Every request
//! carries the current bearer credential; the queue decides job ordering
//! and claim exclusivity, this layer only reports what it answered.

use async_trait::async_trait;
use fulcrum_core::domain::job::Job;
use fulcrum_core::domain::metric::MetricEntry;
use fulcrum_core::dto::agent::AgentStatusUpdate;
use fulcrum_core::dto::job::FailJobRequest;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Result;
use crate::{FulcrumApi, HttpFulcrumClient, handle_empty_response, handle_response};

#[async_trait]
impl FulcrumApi for HttpFulcrumClient {
    // =========================================================================
    // Agent Lifecycle
    // =========================================================================

    async fn update_agent_status(&self, status: &str) -> Result<()> {
        let url = self.url("/api/v1/agents/me/status");
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.bearer_token())
            .json(&AgentStatusUpdate {
                status: status.to_string(),
            })
            .send()
            .await?;

        handle_empty_response(response).await
    }

    async fn agent_info(&self) -> Result<HashMap<String, serde_json::Value>> {
        let url = self.url("/api/v1/agents/me");
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer_token())
            .send()
            .await?;

        handle_response(response).await
    }

    // =========================================================================
    // Job Lifecycle
    // =========================================================================

    async fn pending_jobs(&self) -> Result<Vec<Job>> {
        let url = self.url("/api/v1/jobs/pending");
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer_token())
            .send()
            .await?;

        handle_response(response).await
    }

    async fn claim_job(&self, job_id: &str) -> Result<()> {
        let url = self.url(&format!("/api/v1/jobs/{job_id}/claim"));
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.bearer_token())
            .send()
            .await?;

        handle_empty_response(response).await
    }

    async fn complete_job(&self, job_id: &str, resources: serde_json::Value) -> Result<()> {
        let url = self.url(&format!("/api/v1/jobs/{job_id}/complete"));
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.bearer_token())
            .json(&resources)
            .send()
            .await?;

        handle_empty_response(response).await
    }

    async fn fail_job(&self, job_id: &str, error_message: &str) -> Result<()> {
        let url = self.url(&format!("/api/v1/jobs/{job_id}/fail"));
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.bearer_token())
            .json(&FailJobRequest {
                error_message: error_message.to_string(),
            })
            .send()
            .await?;

        handle_empty_response(response).await
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    async fn report_metric(&self, entry: &MetricEntry) -> Result<()> {
        let url = self.url("/api/v1/metric-entries");
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.bearer_token())
            .json(entry)
            .send()
            .await?;

        handle_empty_response(response).await
    }

    // =========================================================================
    // Credential Rotation
    // =========================================================================

    fn update_token(&self, token: &str) {
        debug!("replacing agent credential");
        self.token_cell().set(token);
    }
}
