//! Transaction route handlers
//!
//! Thin glue between HTTP and the record store: parse the id and body, take
//! the store lock for the duration of one operation, and wrap the outcome in
//! the JSON envelope.

use crate::api::AppState;
use crate::types::{LedgerError, RecordId, RecordPayload};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, info};

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match self {
            LedgerError::ValidationError { .. }
            | LedgerError::InvalidRecordId { .. }
            | LedgerError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            LedgerError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            _ => {
                error!("Unexpected error handling request: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            LedgerError::ValidationError { missing } => json!({
                "success": false,
                "error": self.to_string(),
                "missing": missing,
            }),
            _ => json!({
                "success": false,
                "error": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// GET /transactions
pub async fn list_transactions(State(state): State<AppState>) -> Response {
    let records = state.store.lock().await.all();
    info!(count = records.len(), "GET /transactions");

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "count": records.len(),
            "data": records,
        })),
    )
        .into_response()
}

/// GET /transactions/:id
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, LedgerError> {
    info!("GET /transactions/{}", raw_id);
    let id = parse_record_id(&raw_id)?;

    let store = state.store.lock().await;
    let record = store
        .get(id)
        .ok_or_else(|| LedgerError::record_not_found(id, "get"))?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": record,
        })),
    )
        .into_response())
}

/// POST /transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<Response, LedgerError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    info!("POST /transactions - payload: {:?}", payload);

    let record = state.store.lock().await.insert(payload)?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// PUT /transactions/:id
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<Response, LedgerError> {
    info!("PUT /transactions/{}", raw_id);
    let id = parse_record_id(&raw_id)?;
    let Json(payload) = payload.map_err(invalid_body)?;

    let record = state.store.lock().await.update(id, payload)?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

/// DELETE /transactions/:id
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, LedgerError> {
    info!("DELETE /transactions/{}", raw_id);
    let id = parse_record_id(&raw_id)?;

    let removed = state.store.lock().await.delete(id)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": format!("Transaction {} deleted", id),
            "data": removed,
        })),
    )
        .into_response())
}

/// Fallback for unrouted paths
pub async fn endpoint_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
        })),
    )
        .into_response()
}

fn parse_record_id(raw: &str) -> Result<RecordId, LedgerError> {
    raw.trim()
        .parse()
        .map_err(|_| LedgerError::invalid_record_id(raw))
}

fn invalid_body(rejection: JsonRejection) -> LedgerError {
    LedgerError::InvalidPayload {
        message: rejection.body_text(),
    }
}
