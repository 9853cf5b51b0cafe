//! Agent configuration
//!
//! All parameters come from the environment. The four service parameters
//! are required: a missing one aborts startup before the scheduler ever
//! runs.

use std::time::Duration;

/// Interval between poll cycles. Fixed; not currently configurable.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

const DEFAULT_HTTP_PORT: u16 = 8080;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Fulcrum Core base URL
    pub fulcrum_url: String,

    /// Initial agent credential for Fulcrum Core
    pub fulcrum_token: String,

    /// Tenant-manager base URL
    pub tmanager_url: String,

    /// Process-manager base URL
    pub pmanager_url: String,

    /// Management API listen port
    pub http_port: u16,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - FULCRUM_URL (required)
    /// - FULCRUM_TOKEN (required)
    /// - TMANAGER_URL (required)
    /// - PMANAGER_URL (required)
    /// - HTTP_PORT (optional, default: 8080)
    pub fn from_env() -> anyhow::Result<Self> {
        let fulcrum_url = require("FULCRUM_URL")?;
        let fulcrum_token = require("FULCRUM_TOKEN")?;
        let tmanager_url = require("TMANAGER_URL")?;
        let pmanager_url = require("PMANAGER_URL")?;

        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        Ok(Self {
            fulcrum_url,
            fulcrum_token,
            tmanager_url,
            pmanager_url,
            http_port,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("FULCRUM_URL", &self.fulcrum_url),
            ("TMANAGER_URL", &self.tmanager_url),
            ("PMANAGER_URL", &self.pmanager_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{name} must start with http:// or https://");
            }
        }

        if self.fulcrum_token.is_empty() {
            anyhow::bail!("FULCRUM_TOKEN cannot be empty");
        }

        if self.http_port == 0 {
            anyhow::bail!("HTTP_PORT must be greater than 0");
        }

        Ok(())
    }
}

fn require(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{name} environment variable not set"))
}
