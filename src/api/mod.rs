//! API Module
//!
//! HTTP handlers and routing for the books REST API.
//!
//! # Endpoints
//! - `POST /books` - Create a book
//! - `GET /books` - List all books
//! - `DELETE /books` - Purge all books
//! - `GET /books/count` - Count books
//! - `PATCH /books/validate` - Archive books past the age threshold
//! - `PUT /books/:id` - Update a book
//! - `DELETE /books/:id` - Delete a book
//!
//! Every endpoint requires a matching `X-API-Key` header, enforced by the
//! `require_api_key` layer.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::require_api_key;
pub use routes::create_router;
