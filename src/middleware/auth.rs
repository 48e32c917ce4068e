//! Bearer token gate for the client and admin route groups.
//!
//! No bearer token is a 401. A token that fails verification for the route's
//! domain is a 403, including a valid token from the other domain. On success
//! the handler can take `Extension<D::Principal>`.

use crate::{
    auth::{TokenDomain, TokenService},
    error::AppError,
};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Instantiated once per domain:
///
/// ```ignore
/// .route_layer(axum::middleware::from_fn_with_state(
///     client_tokens,
///     require_token::<ClientDomain>,
/// ))
/// ```
pub async fn require_token<D: TokenDomain>(
    State(tokens): State<TokenService<D>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = {
        let token = bearer_token(request.headers()).ok_or(AppError::MissingCredentials)?;
        tokens.verify(token)?
    };

    // Route handlers can now extract this using Extension<D::Principal>
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// The token from `Authorization: Bearer <token>`, if there is a non-empty one.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AdminDomain, AdminPrincipal, ClientDomain, ClientPrincipal};
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;
    use uuid::Uuid;

    const CLIENT_SECRET: &str = "client-secret-at-least-32-characters-long";
    const ADMIN_SECRET: &str = "admin-secret-at-least-32-characters-long";

    async fn whoami(Extension(client): Extension<ClientPrincipal>) -> String {
        client.client_code
    }

    fn client_tokens() -> TokenService<ClientDomain> {
        TokenService::new(CLIENT_SECRET, Duration::hours(24))
    }

    fn app() -> Router {
        Router::new()
            .route("/me", get(whoami))
            .route_layer(axum::middleware::from_fn_with_state(
                client_tokens(),
                require_token::<ClientDomain>,
            ))
    }

    async fn call(authorization: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }

        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn client_token() -> String {
        client_tokens()
            .issue(&ClientPrincipal {
                client_code: "0427".to_string(),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let (status, _) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_401() {
        let (status, _) = call(Some(format!("Basic {}", client_token()))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_bearer_is_401() {
        let (status, _) = call(Some("Bearer ".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_403() {
        let (status, _) = call(Some("Bearer not.a.jwt".to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_expired_token_is_403() {
        let token = client_tokens()
            .issue_at(
                &ClientPrincipal {
                    client_code: "0427".to_string(),
                },
                Utc::now() - Duration::hours(48),
            )
            .unwrap();

        let (status, _) = call(Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_token_on_client_route_is_403() {
        let admin_tokens = TokenService::<AdminDomain>::new(ADMIN_SECRET, Duration::hours(24));
        let token = admin_tokens
            .issue(&AdminPrincipal {
                id: Uuid::new_v4(),
                email: "admin@dreamcatcher.com".to_string(),
            })
            .unwrap();

        let (status, _) = call(Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_principal() {
        let (status, body) = call(Some(format!("Bearer {}", client_token()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "0427");
    }
}
