//! Fulcrum CFM Agent
//!
//! An agent for the Fulcrum Core control plane. It polls the job queue on a
//! fixed cadence, claims at most one pending job per cycle, dispatches the
//! job's workflow action, and reports the outcome back. A small management
//! API allows rotating the agent credential at runtime.
//!
//! Architecture:
//! - Configuration: environment-based settings, validated at startup
//! - Client layer: Fulcrum Core and process-manager HTTP clients
//! - Service: the job processing engine and its statistics
//! - Scheduler: fixed-cadence polling with cooperative shutdown
//! - API: management surface (/ping, /fulcrum-token)

mod api;
mod config;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, POLL_INTERVAL};
use crate::scheduler::PollScheduler;
use crate::service::JobProcessor;
use fulcrum_client::{FulcrumApi, HttpDeploymentClient, HttpFulcrumClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fulcrum_agent=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fulcrum CFM Agent");

    // Load configuration; missing required parameters are fatal here,
    // before the scheduler ever runs.
    let config = Config::from_env()?;
    config.validate()?;
    info!(
        fulcrum_url = %config.fulcrum_url,
        http_port = config.http_port,
        "Loaded configuration"
    );

    let fulcrum: Arc<dyn FulcrumApi> = Arc::new(HttpFulcrumClient::new(
        config.fulcrum_url.clone(),
        config.fulcrum_token.clone(),
    ));
    let deployments = Arc::new(HttpDeploymentClient::new(config.pmanager_url.clone()));

    // Announce the agent before polling starts.
    announce_with_retry(fulcrum.as_ref()).await?;
    match fulcrum.agent_info().await {
        Ok(attributes) => info!(?attributes, "Agent registered with Fulcrum Core"),
        Err(e) => warn!(error = %e, "Could not fetch agent info"),
    }

    let processor = Arc::new(JobProcessor::new(Arc::clone(&fulcrum), deployments));
    let poller = PollScheduler::new(processor, POLL_INTERVAL).start();
    info!(interval = ?POLL_INTERVAL, "Job poll loop started");

    // Serve the management API until interrupted.
    let app = api::create_router(Arc::clone(&fulcrum));
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind management API to {addr}"))?;
    info!("Management API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("management API server failed")?;

    info!("Shutting down");
    poller.stop().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}

/// Announces the agent to the control plane with retry and exponential
/// backoff; the control plane may not be up yet when the agent starts
/// (common in container environments).
async fn announce_with_retry(client: &dyn FulcrumApi) -> Result<()> {
    const MAX_RETRIES: u32 = 10;
    const INITIAL_DELAY_MS: u64 = 500;
    const MAX_DELAY_MS: u64 = 30_000;

    let mut attempt = 0;
    let mut delay_ms = INITIAL_DELAY_MS;

    loop {
        attempt += 1;

        match client.update_agent_status("Connected").await {
            Ok(()) => {
                if attempt > 1 {
                    info!("Reported agent status after {} attempt(s)", attempt);
                }
                return Ok(());
            }
            Err(e) => {
                if attempt >= MAX_RETRIES {
                    error!(
                        "Failed to reach Fulcrum Core after {} attempts",
                        MAX_RETRIES
                    );
                    return Err(anyhow::anyhow!("failed to report agent status: {}", e));
                }

                warn!(
                    "Failed to report agent status (attempt {}/{}): {}",
                    attempt, MAX_RETRIES, e
                );
                warn!("Retrying in {} ms...", delay_ms);

                tokio::time::sleep(Duration::from_millis(delay_ms)).await;

                // Exponential backoff with cap
                delay_ms = (delay_ms * 2).min(MAX_DELAY_MS);
            }
        }
    }
}
