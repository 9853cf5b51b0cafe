//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A job from the Fulcrum Core job queue.
///
/// Jobs are ephemeral client-side views: fetched fresh each poll cycle and
/// discarded once the cycle completes. The queue assigns `priority` and the
/// ordering of pending jobs; the agent never reorders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub action: JobAction,
    pub status: JobStatus,
    pub priority: i64,
    pub service: ServiceRecord,
}

/// The service a job operates on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub current_properties: Option<ResourceProperties>,
    #[serde(default)]
    pub target_properties: Option<ResourceProperties>,
}

/// Resource allocation of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProperties {
    pub cpu: i64,
    pub memory: i64,
}

/// Workflow action carried by a job.
///
/// Unrecognized action strings are preserved verbatim in `Other` so a queue
/// response always decodes; the processor reports them back as failures
/// instead of dropping the job on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobAction {
    ServiceCreate,
    ServiceStart,
    ServiceStop,
    ServiceHotUpdate,
    ServiceColdUpdate,
    ServiceDelete,
    Other(String),
}

impl JobAction {
    pub fn as_str(&self) -> &str {
        match self {
            JobAction::ServiceCreate => "ServiceCreate",
            JobAction::ServiceStart => "ServiceStart",
            JobAction::ServiceStop => "ServiceStop",
            JobAction::ServiceHotUpdate => "ServiceHotUpdate",
            JobAction::ServiceColdUpdate => "ServiceColdUpdate",
            JobAction::ServiceDelete => "ServiceDelete",
            JobAction::Other(action) => action,
        }
    }
}

impl From<String> for JobAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ServiceCreate" => JobAction::ServiceCreate,
            "ServiceStart" => JobAction::ServiceStart,
            "ServiceStop" => JobAction::ServiceStop,
            "ServiceHotUpdate" => JobAction::ServiceHotUpdate,
            "ServiceColdUpdate" => JobAction::ServiceColdUpdate,
            "ServiceDelete" => JobAction::ServiceDelete,
            _ => JobAction::Other(value),
        }
    }
}

impl From<JobAction> for String {
    fn from(action: JobAction) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for JobAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Queue-side lifecycle status of a job.
///
/// Transitions are monotonic: Pending -> Processing -> {Completed, Failed}.
/// The agent never moves a job backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_decodes_from_queue_response() {
        let body = serde_json::json!({
            "id": "job-1",
            "action": "ServiceCreate",
            "status": "Pending",
            "priority": 3,
            "service": {
                "id": "svc-1",
                "name": "tenant-deployment",
                "externalId": "ext-1",
                "currentProperties": { "cpu": 2, "memory": 4096 },
                "targetProperties": null
            }
        });

        let job: Job = serde_json::from_value(body).unwrap();
        assert_eq!(job.id, "job-1");
        assert_eq!(job.action, JobAction::ServiceCreate);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.service.external_id.as_deref(), Some("ext-1"));
        assert_eq!(
            job.service.current_properties,
            Some(ResourceProperties { cpu: 2, memory: 4096 })
        );
        assert!(job.service.target_properties.is_none());
    }

    #[test]
    fn test_unknown_action_is_preserved() {
        let action: JobAction = serde_json::from_value(serde_json::json!("ServiceReboot")).unwrap();
        assert_eq!(action, JobAction::Other("ServiceReboot".to_string()));

        let encoded = serde_json::to_value(&action).unwrap();
        assert_eq!(encoded, serde_json::json!("ServiceReboot"));
    }

    #[test]
    fn test_action_round_trip() {
        for name in [
            "ServiceCreate",
            "ServiceStart",
            "ServiceStop",
            "ServiceHotUpdate",
            "ServiceColdUpdate",
            "ServiceDelete",
        ] {
            let action = JobAction::from(name.to_string());
            assert!(!matches!(action, JobAction::Other(_)));
            assert_eq!(action.as_str(), name);
        }
    }
}
