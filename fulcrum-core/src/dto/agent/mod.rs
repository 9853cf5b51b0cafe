//! Agent self-management DTOs

use serde::{Deserialize, Serialize};

/// Body of an agent status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatusUpdate {
    pub status: String,
}

/// Body of a credential rotation request against the agent management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTokenRequest {
    pub token: String,
}
