//! Request DTOs for the books API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Deserializer};

use super::Book;

/// Request body for POST /books
///
/// Every property is required; a JSON `null` string reads as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub isbn: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub publisher: String,
    pub year: i32,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

impl CreateBookRequest {
    /// Converts into an unsaved book: no id, not archived, never validated.
    pub fn into_book(self) -> Book {
        Book {
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            publisher: self.publisher,
            year: self.year,
            description: self.description,
            ..Default::default()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
