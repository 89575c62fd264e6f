//! API Handlers
//!
//! HTTP request handlers for each books endpoint. Requests reach these only
//! after `require_api_key` has accepted them; each handler parses, then calls
//! the store.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info, instrument};

use crate::auth::AuthChecker;
use crate::error::{ApiError, Result};
use crate::models::{Book, CountResponse, CreateBookRequest, ValidationResponse};
use crate::secrets::Clock;
use crate::store::{BookStore, DEFAULT_ARCHIVE_THRESHOLD_YEARS};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Book persistence
    pub store: BookStore,
    /// Request authorization
    pub auth: Arc<dyn AuthChecker>,
    /// Time source for archival batches
    pub clock: Arc<dyn Clock>,
    /// Age threshold passed to the archival routine
    pub archive_threshold_years: i32,
}

impl AppState {
    /// Creates a new AppState with the default archival threshold.
    pub fn new(store: BookStore, auth: Arc<dyn AuthChecker>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            auth,
            clock,
            archive_threshold_years: DEFAULT_ARCHIVE_THRESHOLD_YEARS,
        }
    }

    pub fn with_archive_threshold(mut self, years: i32) -> Self {
        self.archive_threshold_years = years;
        self
    }
}

/// Handler for POST /books
///
/// A body that does not parse goes down the generic 500 path, not 400.
#[instrument(name = "create_book", skip_all)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>)> {
    debug!(body = %String::from_utf8_lossy(&body), "Raw JSON received");

    let request: CreateBookRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Internal(format!("unreadable book payload: {}", e)))?;

    let created = state.store.create(request.into_book()).await?;
    info!(id = %created.id, "Book created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /books
#[instrument(name = "get_books", skip_all)]
pub async fn get_books_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>> {
    Ok(Json(state.store.get_all().await?))
}

/// Handler for GET /books/count
#[instrument(name = "count_books", skip_all)]
pub async fn count_books_handler(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>> {
    let count = state.store.count().await?;
    Ok(Json(CountResponse { count }))
}

/// Handler for PUT /books/:id
///
/// The body is a full book; every field but the id is overwritten.
#[instrument(name = "update_book", skip_all, fields(id = %id))]
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Book>> {
    let updated: Book = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Update body rejected");
        ApiError::invalid_json()
    })?;

    match state.store.update(&id, &updated).await? {
        Some(stored) => Ok(Json(stored)),
        None => Err(ApiError::book_not_found()),
    }
}

/// Handler for DELETE /books/:id
#[instrument(name = "delete_book", skip_all, fields(id = %id))]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.store.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::book_not_found())
    }
}

/// Handler for DELETE /books
#[instrument(name = "purge_books", skip_all)]
pub async fn purge_books_handler(
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.store.purge().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PATCH /books/validate
///
/// Runs the archival routine with one batch timestamp, which is also returned.
#[instrument(name = "validate_books", skip_all)]
pub async fn validate_books_handler(
    State(state): State<AppState>,
) -> Result<Json<ValidationResponse>> {
    let now = state.clock.now();
    let updated_count = state
        .store
        .validate_and_archive_old_books_at(state.archive_threshold_years, now)
        .await?;

    info!(updated_count, timestamp = %now, "Validation completed");
    Ok(Json(ValidationResponse {
        updated_count,
        timestamp: now,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuth;
    use crate::secrets::{EnvSource, ManualClock, SecretProvider};
    use chrono::{TimeZone, Utc};

    async fn test_state() -> AppState {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
        ));
        let store = BookStore::in_memory(clock.clone()).await.unwrap();
        let secrets =
            SecretProvider::env_only(EnvSource::fixed([("API_KEY", "handler-key")]), clock.clone());
        AppState::new(store, Arc::new(ApiKeyAuth::new(Arc::new(secrets))), clock)
    }

    fn create_body() -> Bytes {
        Bytes::from_static(
            br#"{"title":"Dune","author":"Herbert","isbn":"0441013597","publisher":"Ace","year":1965,"description":"Sci-fi"}"#,
        )
    }

    #[tokio::test]
    async fn test_create_and_count_handler() {
        let state = test_state().await;

        let (status, created) = create_book_handler(State(state.clone()), create_body())
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(!created.id.is_empty());
        assert!(!created.archived);

        let count = count_books_handler(State(state)).await.unwrap();
        assert_eq!(count.count, 1);
    }

    #[tokio::test]
    async fn test_create_malformed_is_internal() {
        let state = test_state().await;

        let result =
            create_book_handler(State(state.clone()), Bytes::from_static(b"{\"title\":")).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
        assert_eq!(state.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_handler_invalid_json() {
        let state = test_state().await;

        let result = update_book_handler(
            State(state),
            Path("any".to_string()),
            Bytes::from_static(b"not json"),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadInput(_))));
    }

    #[tokio::test]
    async fn test_update_handler_not_found() {
        let state = test_state().await;

        let result = update_book_handler(
            State(state),
            Path("missing".to_string()),
            Bytes::from_static(br#"{"title":"X","author":"Y","year":2000}"#),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state().await;
        let (_, created) = create_book_handler(State(state.clone()), create_body())
            .await
            .unwrap();

        let status = delete_book_handler(State(state.clone()), Path(created.id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let again = delete_book_handler(State(state), Path(created.id.clone())).await;
        assert!(matches!(again, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_validate_handler_reports_batch() {
        let state = test_state().await;
        create_book_handler(State(state.clone()), create_body())
            .await
            .unwrap();

        let response = validate_books_handler(State(state.clone()))
            .await
            .unwrap();
        assert_eq!(response.updated_count, 1);
        assert_eq!(response.timestamp, state.clock.now());
    }
}
