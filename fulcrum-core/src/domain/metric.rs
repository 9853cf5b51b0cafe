//! Metric types

use serde::{Deserialize, Serialize};

/// A single measurement reported to Fulcrum Core.
///
/// Entries are write-once and fire-and-forget; the agent appends them and
/// never reads them back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    pub external_id: String,
    pub resource_id: String,
    pub value: f64,
    pub type_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_entry_wire_format() {
        let entry = MetricEntry {
            external_id: "ext-1".to_string(),
            resource_id: "res-1".to_string(),
            value: 0.75,
            type_name: "cpu.utilization".to_string(),
        };

        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "externalId": "ext-1",
                "resourceId": "res-1",
                "value": 0.75,
                "typeName": "cpu.utilization"
            })
        );
    }
}
