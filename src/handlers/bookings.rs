//! Booking HTTP handlers for clients.
//!
//! - POST /api/bookings - Submit a booking (public)
//! - GET /api/my-booking - The authenticated client's booking
//! - PATCH /api/my-booking - Update address, schedule and notes

use crate::{
    auth::ClientPrincipal,
    error::AppError,
    extract::AppJson,
    models::booking::{
        BookingCreatedResponse, BookingResponse, BookingUpdatedResponse, CreateBookingRequest,
        UpdateMyBookingRequest,
    },
    services::booking_service,
    state::AppState,
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

/// Submit a booking.
///
/// # Response
///
/// - **Success (201 Created)**:
///   `{"message": "...", "bookingId": "<uuid>", "clientId": "0427"}`
/// - **Error (400)**: a required field is missing
/// - **Error (500)**: Database error
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = booking_service::create_booking(&state, request).await?;

    Ok((StatusCode::CREATED, Json(BookingCreatedResponse::from(created))))
}

/// Returns 404 if the booking behind the token has been removed.
pub async fn get_my_booking(
    State(state): State<AppState>,
    Extension(client): Extension<ClientPrincipal>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service::get_by_client_code(&state, &client.client_code).await?;

    Ok(Json(booking.into()))
}

pub async fn update_my_booking(
    State(state): State<AppState>,
    Extension(client): Extension<ClientPrincipal>,
    AppJson(request): AppJson<UpdateMyBookingRequest>,
) -> Result<Json<BookingUpdatedResponse>, AppError> {
    let booking = booking_service::update_own_booking(&state, &client.client_code, request).await?;

    Ok(Json(BookingUpdatedResponse {
        message: "Booking updated successfully.",
        booking: booking.into(),
    }))
}
