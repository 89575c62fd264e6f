//! Book entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogued book.
///
/// JSON uses lower-camel-case names (`validatedOn`). Missing properties
/// deserialize to defaults, so an update payload may omit fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    /// Server-assigned UUID, immutable after creation
    pub id: String,
    pub title: String,
    pub author: String,
    /// Kept as text: may carry leading zeros or dashes
    pub isbn: String,
    pub publisher: String,
    /// Publication year
    pub year: i32,
    pub description: String,
    /// Set by the archival routine together with `validated_on`
    pub archived: bool,
    /// Last time the archival routine touched this record
    pub validated_on: Option<DateTime<Utc>>,
}
