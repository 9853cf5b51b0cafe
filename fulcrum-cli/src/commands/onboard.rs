//! Onboarding scenario
//!
//! Sequentially provisions the fixtures a demo needs: activity and
//! deployment definitions on the process manager, then provider, service
//! group, agent, and agent token on Fulcrum Core. Finally pushes the fresh
//! token to the running agent and records the created identifiers in
//! `demo-config.json`.

use anyhow::{Context, Result, anyhow};
use colored::*;
use serde::Serialize;
use serde_json::Value;

use crate::api::AdminClient;
use crate::config::{Config, DEMO_CONFIG_FILE, DemoConfig};
use fulcrum_core::dto::agent::UpdateTokenRequest;
use fulcrum_core::dto::deployment::{
    ActivityDefinition, ActivitySpec, DeploymentDefinition, ResourceDescriptor, VersionSpec,
};

/// Agent type created by Fulcrum Core seeding.
const SEED_AGENT_TYPE: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d479";

pub async fn run(config: &Config) -> Result<()> {
    println!("{}", "Starting onboarding process...".bold());

    let client = AdminClient::new(config);

    create_test_activity_definition(&client)
        .await
        .context("failed to create test activity definition")?;

    create_test_deployment_definition(&client)
        .await
        .context("failed to create test deployment definition")?;

    let provider_id = create_provider(&client, "Test Provider")
        .await
        .context("failed to create provider")?;
    println!("Created Fulcrum provider: {}", provider_id.green());

    let service_group_id = create_service_group(&client, "CFM Service Group", &provider_id)
        .await
        .context("failed to create service group")?;

    let agent_id = create_agent(&client, "Test Agent", &provider_id)
        .await
        .context("failed to create agent")?;
    println!("Created Fulcrum agent: {}", agent_id.green());

    let agent_token = create_agent_token(&client, "Test Agent Token", &agent_id)
        .await
        .context("failed to create agent token")?;
    println!("Created agent token");

    client
        .post_to_agent("fulcrum-token", &UpdateTokenRequest { token: agent_token })
        .await
        .context("failed to update token on the agent")?;
    println!("Updated CFM agent with token");

    let demo = DemoConfig {
        provider_id,
        agent_id,
        service_group_id,
    };
    demo.save(DEMO_CONFIG_FILE)?;
    println!("Config file written to {DEMO_CONFIG_FILE}");

    println!("{}", "Onboarding process completed successfully".bold());
    Ok(())
}

async fn create_test_activity_definition(client: &AdminClient) -> Result<()> {
    client
        .post_to_pmanager(
            "activity-definition",
            &ActivityDefinition {
                activity_type: "test.activity".to_string(),
                description: "Performs a test activity".to_string(),
            },
        )
        .await
}

async fn create_test_deployment_definition(client: &AdminClient) -> Result<()> {
    client
        .post_to_pmanager(
            "deployment-definition",
            &DeploymentDefinition {
                deployment_type: "test.deployment".to_string(),
                api_version: "v1".to_string(),
                resource: ResourceDescriptor {
                    group: "deployments.example.com".to_string(),
                    singular: "TestDeployment".to_string(),
                    plural: "TestDeployments".to_string(),
                    description: "Test deployment".to_string(),
                },
                versions: vec![VersionSpec {
                    version: "1.0.0".to_string(),
                    active: true,
                    activities: vec![ActivitySpec {
                        id: "activity1".to_string(),
                        activity_type: "test-activity".to_string(),
                    }],
                }],
            },
        )
        .await
}

#[derive(Debug, Serialize)]
struct CreateProviderRequest {
    name: String,
    status: String,
}

async fn create_provider(client: &AdminClient, name: &str) -> Result<String> {
    let body = client
        .post_to_fulcrum_core(
            "participants",
            &CreateProviderRequest {
                name: name.to_string(),
                status: "Enabled".to_string(),
            },
        )
        .await?;

    extract_field(&body, "id", "participants")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceGroupRequest {
    name: String,
    #[serde(rename = "consumerID")]
    consumer_id: String,
}

async fn create_service_group(
    client: &AdminClient,
    name: &str,
    consumer_id: &str,
) -> Result<String> {
    let body = client
        .post_to_fulcrum_core(
            "service-groups",
            &ServiceGroupRequest {
                name: name.to_string(),
                consumer_id: consumer_id.to_string(),
            },
        )
        .await?;

    extract_field(&body, "id", "service-groups")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAgentRequest {
    name: String,
    provider_id: String,
    agent_type_id: String,
    tags: Vec<String>,
}

async fn create_agent(client: &AdminClient, name: &str, provider_id: &str) -> Result<String> {
    let body = client
        .post_to_fulcrum_core(
            "agents",
            &CreateAgentRequest {
                name: name.to_string(),
                provider_id: provider_id.to_string(),
                agent_type_id: SEED_AGENT_TYPE.to_string(),
                tags: vec!["cfm".to_string()],
            },
        )
        .await?;

    extract_field(&body, "id", "agents")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAgentTokenRequest {
    name: String,
    description: String,
    scope_id: String,
    expires_at: String,
    role: String,
}

async fn create_agent_token(client: &AdminClient, name: &str, agent_id: &str) -> Result<String> {
    let expires_at = (chrono::Utc::now() + chrono::Months::new(600)).to_rfc3339();

    let body = client
        .post_to_fulcrum_core(
            "tokens",
            &CreateAgentTokenRequest {
                name: name.to_string(),
                description: "Agent token".to_string(),
                scope_id: agent_id.to_string(),
                expires_at,
                role: "agent".to_string(),
            },
        )
        .await?;

    extract_field(&body, "value", "tokens")
}

fn extract_field(body: &Value, field: &str, endpoint: &str) -> Result<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{endpoint} response did not contain a {field} field"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_field_reads_string_values() {
        let body = serde_json::json!({ "id": "p-1" });
        assert_eq!(extract_field(&body, "id", "participants").unwrap(), "p-1");
    }

    #[test]
    fn test_extract_field_rejects_missing_or_non_string() {
        let body = serde_json::json!({ "id": 42 });
        assert!(extract_field(&body, "id", "participants").is_err());
        assert!(extract_field(&body, "value", "tokens").is_err());
    }
}
