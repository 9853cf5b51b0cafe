//! Tenant service scenario
//!
//! Creates a tenant service against Fulcrum Core using the identifiers the
//! onboarding step recorded; the resulting job lands on the agent's queue.

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::api::AdminClient;
use crate::config::{Config, DEMO_CONFIG_FILE, DemoConfig};

/// Tenant service type created by Fulcrum Core seeding.
const CFM_TENANT_SERVICE_TYPE: &str = "01940a2e-7b8f-7c4d-9e5a-3f2b1c8d9e0f";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceRequest {
    name: String,
    properties: HashMap<String, serde_json::Value>,
    agent_tags: Vec<String>,
    agent_id: String,
    service_type_id: String,
    group_id: String,
}

pub async fn run(config: &Config) -> Result<()> {
    let demo = DemoConfig::load(DEMO_CONFIG_FILE)?;

    println!("{}", "Starting tenant deployment...".bold());

    let client = AdminClient::new(config);

    let mut properties = HashMap::new();
    properties.insert(
        "tenantDid".to_string(),
        serde_json::Value::String("did:web:tenant.example.com".to_string()),
    );

    let request = ServiceRequest {
        name: "tenant-deployment".to_string(),
        properties,
        agent_tags: Vec::new(),
        agent_id: demo.agent_id,
        service_type_id: CFM_TENANT_SERVICE_TYPE.to_string(),
        group_id: demo.service_group_id,
    };

    client
        .post_to_fulcrum_core("services", &request)
        .await
        .context("failed to create tenant service")?;

    println!("{}", "Service created".green());
    Ok(())
}
