//! Response DTOs for the books API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response body for GET /books/count
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// Response body for PATCH /books/validate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    /// Number of books archived by this run
    pub updated_count: u64,
    /// Batch timestamp written to every archived book
    pub timestamp: DateTime<Utc>,
}
