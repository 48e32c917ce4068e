//! Login for both principal kinds.
//!
//! An unknown identifier and a wrong password produce the same
//! `InvalidCredentials` error after the same amount of bcrypt work, so
//! callers cannot tell which client codes or admin emails exist.

use crate::{
    auth::{AdminPrincipal, ClientPrincipal},
    error::AppError,
    models::admin::Admin,
    state::AppState,
};

/// Exchange a client code and booking password for a client token.
pub async fn login_client(
    state: &AppState,
    client_code: &str,
    password: &str,
) -> Result<String, AppError> {
    let record: Option<(String, String)> =
        sqlx::query_as("SELECT client_code, password_hash FROM bookings WHERE client_code = $1")
            .bind(client_code)
            .fetch_optional(&state.pool)
            .await?;

    let Some((client_code, password_hash)) = record else {
        state.hasher.verify_absent(password).await;
        tracing::info!("client login rejected: unknown client code");
        return Err(AppError::InvalidCredentials);
    };

    if !state.hasher.verify(password, &password_hash).await {
        tracing::info!(%client_code, "client login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    state.client_tokens.issue(&ClientPrincipal { client_code })
}

/// Exchange an admin email and password for an admin token.
pub async fn login_admin(state: &AppState, email: &str, password: &str) -> Result<String, AppError> {
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, email, password_hash, created_at FROM admins WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(&state.pool)
    .await?;

    let Some(admin) = admin else {
        state.hasher.verify_absent(password).await;
        tracing::info!("admin login rejected: unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !state.hasher.verify(password, &admin.password_hash).await {
        tracing::info!(admin_id = %admin.id, "admin login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    state.admin_tokens.issue(&AdminPrincipal {
        id: admin.id,
        email: admin.email,
    })
}
