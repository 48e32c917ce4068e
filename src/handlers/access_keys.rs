//! Access key HTTP handlers.
//!
//! - POST /api/validate-key - Public check that a key exists
//! - GET /api/admin/access-keys - List keys (admin)
//! - POST /api/admin/access-keys - Mint a key (admin)
//! - DELETE /api/admin/access-keys/{id} - Remove a key (admin)

use crate::{
    auth::AdminPrincipal,
    error::AppError,
    extract::AppJson,
    models::access_key::{AccessKey, CreateAccessKeyRequest, ValidateKeyRequest, ValidateKeyResponse},
    services::access_key_service,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Check an access key before showing the booking form.
///
/// # Response
///
/// - **Success (200 OK)**: `{"valid": true, "message": "Key is valid."}`
/// - **Error (400)**: `key` missing
/// - **Error (404)**: no such key
pub async fn validate_key(
    State(state): State<AppState>,
    AppJson(request): AppJson<ValidateKeyRequest>,
) -> Result<Json<ValidateKeyResponse>, AppError> {
    let key = request
        .key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::Validation("Access key is required.".to_string()))?;

    if !access_key_service::key_exists(&state, &key).await? {
        return Err(AppError::NotFound("Invalid access key."));
    }

    Ok(Json(ValidateKeyResponse {
        valid: true,
        message: "Key is valid.",
    }))
}

/// Mint a new access key.
///
/// # Request Body
///
/// ```json
/// { "ownerLabel": "Kowalski wedding" }
/// ```
///
/// # Response (201 Created)
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "code": "Q7X2KD",
///   "ownerLabel": "Kowalski wedding",
///   "createdAt": "2026-01-15T10:30:00Z"
/// }
/// ```
pub async fn create_access_key(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminPrincipal>,
    AppJson(request): AppJson<CreateAccessKeyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let key = access_key_service::create_access_key(&state, request.owner_label).await?;
    tracing::info!(admin = %admin.email, access_key_id = %key.id, "admin minted access key");

    Ok((StatusCode::CREATED, Json(key)))
}

pub async fn list_access_keys(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccessKey>>, AppError> {
    Ok(Json(access_key_service::list_access_keys(&state).await?))
}

/// Returns 204 No Content, or 404 if the key does not exist.
pub async fn delete_access_key(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminPrincipal>,
    Path(key_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    access_key_service::delete_access_key(&state, key_id).await?;
    tracing::info!(admin = %admin.email, access_key_id = %key_id, "admin deleted access key");

    Ok(StatusCode::NO_CONTENT)
}
