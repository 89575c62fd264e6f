//! API Middleware
//!
//! Request authorization, applied in front of every route so that no
//! extractor (path decoding, body limits) can answer before the key check.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument};

use super::handlers::AppState;
use crate::error::{ApiError, Result};

/// Rejects the request with 401 unless the auth checker accepts its headers.
///
/// A failure to resolve the expected key is a 500, and the store is never
/// reached in either case.
#[instrument(name = "authorize", skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if state.auth.is_authorized(request.headers()).await? {
        Ok(next.run(request).await)
    } else {
        debug!("Rejected request with invalid API key");
        Err(ApiError::Unauthorized)
    }
}
