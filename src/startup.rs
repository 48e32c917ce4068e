//! Router construction.

use crate::{
    auth::{AdminDomain, ClientDomain},
    handlers,
    middleware::auth::require_token,
    state::AppState,
};
use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

/// Build the full HTTP router.
///
/// # Route groups
///
/// - public: banner, health, key validation, booking submission, both logins
/// - client: `/api/my-booking`, guarded by the client token domain
/// - admin: `/api/admin/*` except login, guarded by the admin token domain
pub fn router(state: AppState) -> Router {
    let client_routes = Router::new()
        .route(
            "/api/my-booking",
            get(handlers::bookings::get_my_booking).patch(handlers::bookings::update_my_booking),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.client_tokens.clone(),
            require_token::<ClientDomain>,
        ));

    let admin_routes = Router::new()
        .route(
            "/api/admin/bookings",
            get(handlers::admin_bookings::list_bookings),
        )
        .route(
            "/api/admin/bookings/{id}",
            get(handlers::admin_bookings::get_booking)
                .patch(handlers::admin_bookings::update_booking),
        )
        .route(
            "/api/admin/access-keys",
            get(handlers::access_keys::list_access_keys)
                .post(handlers::access_keys::create_access_key),
        )
        .route(
            "/api/admin/access-keys/{id}",
            delete(handlers::access_keys::delete_access_key),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.admin_tokens.clone(),
            require_token::<AdminDomain>,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/api/validate-key", post(handlers::access_keys::validate_key))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/login", post(handlers::auth::client_login))
        .route("/api/admin/login", post(handlers::auth::admin_login))
        .merge(client_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
