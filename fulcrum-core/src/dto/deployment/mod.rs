//! Process-manager DTOs
//!
//! Request bodies for the process-manager API: the manifest the agent
//! submits when dispatching a job, and the definition fixtures the demo
//! CLI registers during onboarding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Manifest submitted to the process manager to effect a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    pub deployment_type: String,
    pub id: String,
    pub payload: Map<String, Value>,
}

/// Activity definition registered with the process manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDefinition {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: String,
}

/// Deployment definition registered with the process manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDefinition {
    #[serde(rename = "type")]
    pub deployment_type: String,
    pub api_version: String,
    pub resource: ResourceDescriptor,
    pub versions: Vec<VersionSpec>,
}

/// Custom-resource descriptor inside a deployment definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub group: String,
    pub singular: String,
    pub plural: String,
    pub description: String,
}

/// One version of a deployment definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionSpec {
    pub version: String,
    pub active: bool,
    pub activities: Vec<ActivitySpec>,
}

/// Activity reference inside a deployment version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySpec {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_wire_format() {
        let manifest = DeploymentManifest {
            deployment_type: "test.deployment".to_string(),
            id: "d-1".to_string(),
            payload: Map::new(),
        };

        let encoded = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "deploymentType": "test.deployment",
                "id": "d-1",
                "payload": {}
            })
        );
    }
}
