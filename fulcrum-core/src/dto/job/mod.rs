//! Job lifecycle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a job failure report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailJobRequest {
    pub error_message: String,
}

/// Completion payload for a processed job.
///
/// The queue treats this as opaque; its shape is agreed with the consumers
/// of job results, not with the queue itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReport {
    pub resources: ReportedResources,
    pub external_id: Option<String>,
}

/// Resource snapshot attached to a completion report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportedResources {
    pub ts: DateTime<Utc>,
}
