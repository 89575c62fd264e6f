//! Domain and wire models for the books API
//!
//! `Book` is both the persisted row and the JSON representation; the request
//! and response modules hold endpoint-specific bodies.

pub mod book;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use book::Book;
pub use requests::CreateBookRequest;
pub use responses::{CountResponse, ValidationResponse};
