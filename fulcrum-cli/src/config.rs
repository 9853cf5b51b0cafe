//! CLI configuration
//!
//! Service endpoints for the demo commands, plus the config file the
//! onboarding step writes so later commands can reuse its identifiers.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File the `onboard` command writes and the `service` command reads.
pub const DEMO_CONFIG_FILE: &str = "demo-config.json";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Fulcrum Core API base URL
    pub fulcrum_core_url: String,
    /// Process-manager base URL
    pub pmanager_url: String,
    /// CFM agent management API base URL
    pub agent_url: String,
    /// Admin token for Fulcrum Core
    pub admin_token: String,
}

/// Identifiers produced by onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    pub provider_id: String,
    pub agent_id: String,
    pub service_group_id: String,
}

impl DemoConfig {
    /// Reads and validates a previously written demo config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).with_context(|| {
            format!(
                "failed to read {}; run the onboard command first",
                path.display()
            )
        })?;

        let config: DemoConfig =
            serde_json::from_str(&data).context("failed to parse demo config")?;
        config.validate()?;

        Ok(config)
    }

    /// Writes the demo config to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to serialize demo config")?;
        std::fs::write(path.as_ref(), data)
            .with_context(|| format!("failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.provider_id.is_empty() {
            bail!("providerId is missing or empty in demo config");
        }
        if self.agent_id.is_empty() {
            bail!("agentId is missing or empty in demo config");
        }
        if self.service_group_id.is_empty() {
            bail!("serviceGroupId is missing or empty in demo config");
        }
        Ok(())
    }
}
