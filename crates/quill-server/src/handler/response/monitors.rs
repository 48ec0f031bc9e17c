//! Monitor response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Health check response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Whether the database answered.
    pub is_healthy: bool,
    /// Timestamp when this status was generated.
    pub updated_at: Timestamp,
}

impl MonitorStatus {
    pub fn new(is_healthy: bool) -> Self {
        Self {
            is_healthy,
            updated_at: Timestamp::now(),
        }
    }
}
