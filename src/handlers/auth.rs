//! Login handlers for clients and administrators.

use crate::{
    error::AppError,
    extract::AppJson,
    models::admin::{AdminLoginRequest, ClientLoginRequest, TokenResponse},
    services::auth_service,
    state::AppState,
};
use axum::{Json, extract::State};

/// `POST /api/login`
///
/// # Request Body
///
/// ```json
/// { "clientId": "0427", "password": "secret1" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"token": "<jwt>"}`
/// - **Error (400)**: either field missing or empty
/// - **Error (401)**: unknown client code or wrong password (same body for both)
pub async fn client_login(
    State(state): State<AppState>,
    AppJson(request): AppJson<ClientLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let (client_id, password) = request.credentials()?;

    let token = auth_service::login_client(&state, &client_id, &password).await?;

    Ok(Json(TokenResponse { token }))
}

/// `POST /api/admin/login`
///
/// Same contract as [`client_login`], keyed by email, returning an admin token.
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(request): AppJson<AdminLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let (email, password) = request.credentials()?;

    let token = auth_service::login_admin(&state, &email, &password).await?;

    Ok(Json(TokenResponse { token }))
}
