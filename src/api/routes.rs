//! API Routes
//!
//! Configures the Axum router with all books endpoints.

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    count_books_handler, create_book_handler, delete_book_handler, get_books_handler,
    purge_books_handler, update_book_handler, validate_books_handler, AppState,
};
use super::middleware::require_api_key;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /books` - Create a book
/// - `GET /books` - List all books
/// - `DELETE /books` - Purge all books
/// - `GET /books/count` - Count books
/// - `PATCH /books/validate` - Archive old books
/// - `PUT /books/:id` - Replace a book's fields
/// - `DELETE /books/:id` - Delete a book
///
/// # Middleware
/// - Auth: `X-API-Key` is checked before any extractor runs, unknown paths included
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Static segments take priority over `:id`
    Router::new()
        .route(
            "/books",
            post(create_book_handler)
                .get(get_books_handler)
                .delete(purge_books_handler),
        )
        .route("/books/count", get(count_books_handler))
        .route("/books/validate", patch(validate_books_handler))
        .route(
            "/books/:id",
            put(update_book_handler).delete(delete_book_handler),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
