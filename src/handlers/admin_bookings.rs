//! Admin booking HTTP handlers.
//!
//! - GET /api/admin/bookings - Summaries, newest first
//! - GET /api/admin/bookings/{id} - One booking in full
//! - PATCH /api/admin/bookings/{id} - Full-field edit

use crate::{
    auth::AdminPrincipal,
    error::AppError,
    extract::AppJson,
    models::booking::{
        AdminUpdateBookingRequest, BookingResponse, BookingSummary, BookingUpdatedResponse,
    },
    services::booking_service,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingSummary>>, AppError> {
    let rows = booking_service::list_summaries(&state).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service::get_by_id(&state, booking_id).await?;

    Ok(Json(booking.into()))
}

/// # Response
///
/// - **Success (200 OK)**: `{"message": "...", "booking": {...}}`
/// - **Error (400)**: bride_name, groom_name, email, phone_number or wedding_date missing
/// - **Error (404)**: no booking with this id
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminPrincipal>,
    Path(booking_id): Path<Uuid>,
    AppJson(request): AppJson<AdminUpdateBookingRequest>,
) -> Result<Json<BookingUpdatedResponse>, AppError> {
    let update = request.validate()?;
    let booking = booking_service::admin_update(&state, booking_id, update).await?;
    tracing::info!(admin = %admin.email, %booking_id, "admin updated booking");

    Ok(Json(BookingUpdatedResponse {
        message: "Booking updated successfully.",
        booking: booking.into(),
    }))
}
