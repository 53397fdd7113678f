//! HTTP handlers for the marker CRUD surface.
//!
//! Each handler is a thin adapter over [`MarkerStore`]: the store call runs
//! on the blocking pool, success is shaped into the `{message, id}` contract,
//! and any store failure becomes a 500 with the diagnostic text in the body.
//! A store error never crashes the process.

use crate::AppState;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use vidmark_store::{MarkerStore, StoreError};
use vidmark_types::{Marker, MarkerFields, NewMarker};

/// A failed marker operation, rendered as the API's error contract:
/// `500` with `{message, error}` where `error` carries the underlying
/// diagnostic text. There is no multi-tenant trust boundary here, so the
/// raw diagnostic is acceptable in the response.
pub struct ApiError {
    message: &'static str,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "message": self.message,
                "error": self.detail,
            })),
        )
            .into_response()
    }
}

/// Runs a blocking store operation off the async runtime, mapping both a
/// join error and a store error onto the response contract with `message`
/// as the operation label.
async fn with_store<T, F>(state: &AppState, message: &'static str, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(MarkerStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(store))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, op = message, "store task join error");
            ApiError {
                message,
                detail: e.to_string(),
            }
        })?
        .map_err(|e| {
            tracing::error!(error = %e, op = message, "store operation failed");
            ApiError {
                message,
                detail: e.to_string(),
            }
        })
}

/// POST /markers
pub async fn create_marker_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<NewMarker>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = payload.id.clone();
    with_store(&state, "Error creating marker", move |store| {
        store.create(&payload)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Marker created successfully", "id": id })),
    ))
}

/// GET /markers
pub async fn list_markers_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Marker>>, ApiError> {
    let markers = with_store(&state, "Error fetching markers", |store| store.list_all()).await?;
    Ok(Json(markers))
}

/// PUT /markers/{id}
///
/// Returns the same success shape whether or not a row matched: a zero-row
/// update is idempotent success, not an error.
pub async fn update_marker_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<MarkerFields>,
) -> Result<Json<Value>, ApiError> {
    let marker_id = id.clone();
    let affected = with_store(&state, "Error updating marker", move |store| {
        store.update(&id, &payload)
    })
    .await?;
    if affected == 0 {
        tracing::debug!(id = %marker_id, "update matched no row");
    }

    Ok(Json(
        json!({ "message": "Marker updated successfully", "id": marker_id }),
    ))
}

/// DELETE /markers/{id}
///
/// Like update, deleting an absent id is idempotent success.
pub async fn delete_marker_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let marker_id = id.clone();
    let affected = with_store(&state, "Error deleting marker", move |store| {
        store.delete(&id)
    })
    .await?;
    if affected == 0 {
        tracing::debug!(id = %marker_id, "delete matched no row");
    }

    Ok(Json(
        json!({ "message": "Marker deleted successfully", "id": marker_id }),
    ))
}
