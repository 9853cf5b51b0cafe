//! Process-manager client
//!
//! Submits deployment manifests to the process manager. Kept behind a trait
//! for the same reason as [`FulcrumApi`](crate::FulcrumApi): the job
//! processor takes it as a trait object and tests inject a double.

use async_trait::async_trait;
use fulcrum_core::dto::deployment::DeploymentManifest;
use reqwest::Client;

use crate::error::Result;
use crate::{REQUEST_TIMEOUT, handle_empty_response};

/// Capability for effecting deployments through the process manager.
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Submits a deployment manifest.
    async fn create_deployment(&self, manifest: &DeploymentManifest) -> Result<()>;
}

/// HTTP implementation of [`DeploymentApi`]
#[derive(Debug)]
pub struct HttpDeploymentClient {
    base_url: String,
    client: Client,
}

impl HttpDeploymentClient {
    /// Create a new process-manager client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the process-manager API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to construct HTTP client"),
        }
    }
}

#[async_trait]
impl DeploymentApi for HttpDeploymentClient {
    async fn create_deployment(&self, manifest: &DeploymentManifest) -> Result<()> {
        let url = format!("{}/deployment", self.base_url);
        let response = self.client.post(&url).json(manifest).send().await?;

        handle_empty_response(response).await
    }
}
