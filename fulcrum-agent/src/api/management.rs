//! Management endpoint handlers

use axum::{Json, extract::State, http::StatusCode};
use fulcrum_client::FulcrumApi;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiError;

/// Simple acknowledgment body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /ping
/// Liveness check
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse { message: "OK" })
}

/// POST /fulcrum-token
/// Replaces the credential used for all subsequent Fulcrum Core requests.
/// Requests already in flight keep the credential they were built with.
pub async fn update_token(
    State(client): State<Arc<dyn FulcrumApi>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let token = body
        .get("token")
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            ApiError::BadRequest("token field is required and must be a string".to_string())
        })?;

    client.update_token(token);
    info!("agent credential rotated");

    Ok((StatusCode::CREATED, Json(MessageResponse { message: "OK" })))
}
