//! Booking service - creation and edits of client bookings.
//!
//! # Atomicity Guarantees
//!
//! Booking creation runs inside one PostgreSQL transaction per attempt:
//! the client code lookup and the insert either both commit or nothing is
//! written. A collision on `bookings_client_code_key` rolls the attempt back
//! and starts a new one with a fresh code.

use crate::{
    db::{self, CLIENT_CODE_CONSTRAINT, TableCodes},
    error::AppError,
    models::booking::{
        AdminBookingUpdate, Booking, BookingSummaryRow, CreateBookingRequest, CreatedBooking,
        UpdateMyBookingRequest,
    },
    state::AppState,
};
use uuid::Uuid;

const BOOKING_NOT_FOUND: &str = "Booking not found";

/// Create a booking from a client submission.
///
/// # Process
///
/// 1. Validate required fields
/// 2. Hash the supplied password
/// 3. Start database transaction
/// 4. Allocate a client code not present in `bookings`
/// 5. Insert the row
/// 6. Commit (or rollback and retry on a code collision)
///
/// # Errors
///
/// - `Validation`: a required field is missing
/// - `AllocationExhausted`: no free client code within the retry budget
/// - `Timeout`: the unit of work exceeded its limit
/// - `Database`: Database error occurred
pub async fn create_booking(
    state: &AppState,
    request: CreateBookingRequest,
) -> Result<CreatedBooking, AppError> {
    let booking = request.validate()?;
    let password_hash = state.hasher.hash(&booking.password).await?;

    let pool = &state.pool;
    let allocator = &state.client_codes;
    let booking = &booking;
    let password_hash = password_hash.as_str();

    let created = db::within(
        state.unit_of_work_timeout,
        allocator.insert_unique(move || async move {
            let mut tx = pool.begin().await?;

            let client_code = allocator
                .allocate(&mut TableCodes::client_codes(&mut *tx))
                .await?;

            let created = sqlx::query_as::<_, CreatedBooking>(
                r#"
                INSERT INTO bookings (
                    client_code, password_hash, access_key, package_name, total_price_cents,
                    selected_items, bride_name, groom_name, wedding_date, bride_address,
                    groom_address, locations, schedule, email, phone_number,
                    additional_info, discount_code
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                RETURNING id, client_code
                "#,
            )
            .bind(&client_code)
            .bind(password_hash)
            .bind(&booking.access_key)
            .bind(&booking.package_name)
            .bind(booking.total_price_cents)
            .bind(&booking.selected_items)
            .bind(&booking.bride_name)
            .bind(&booking.groom_name)
            .bind(booking.wedding_date)
            .bind(&booking.bride_address)
            .bind(&booking.groom_address)
            .bind(&booking.locations)
            .bind(&booking.schedule)
            .bind(&booking.email)
            .bind(&booking.phone_number)
            .bind(&booking.additional_info)
            .bind(&booking.discount_code)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db::collision_on(CLIENT_CODE_CONSTRAINT, e))?;

            // Commit all changes atomically
            tx.commit().await?;

            Ok(created)
        }),
    )
    .await?;

    tracing::info!(booking_id = %created.id, client_code = %created.client_code, "Booking created");

    Ok(created)
}

/// Fetch the booking owned by a client code.
pub async fn get_by_client_code(state: &AppState, client_code: &str) -> Result<Booking, AppError> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE client_code = $1")
        .bind(client_code)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound(BOOKING_NOT_FOUND))
}

/// Self-service update of address, schedule and notes.
///
/// Returns `NotFound` when the booking behind the token no longer exists.
pub async fn update_own_booking(
    state: &AppState,
    client_code: &str,
    update: UpdateMyBookingRequest,
) -> Result<Booking, AppError> {
    sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET bride_address = $1,
            groom_address = $2,
            locations = $3,
            schedule = $4,
            additional_info = $5
        WHERE client_code = $6
        RETURNING *
        "#,
    )
    .bind(update.bride_address)
    .bind(update.groom_address)
    .bind(update.locations)
    .bind(update.schedule)
    .bind(update.additional_info)
    .bind(client_code)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound(BOOKING_NOT_FOUND))
}

/// All bookings, newest first, in summary form.
pub async fn list_summaries(state: &AppState) -> Result<Vec<BookingSummaryRow>, AppError> {
    let rows = sqlx::query_as::<_, BookingSummaryRow>(
        r#"
        SELECT id, client_code, bride_name, groom_name, wedding_date, total_price_cents, created_at
        FROM bookings
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(rows)
}

pub async fn get_by_id(state: &AppState, booking_id: Uuid) -> Result<Booking, AppError> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(booking_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound(BOOKING_NOT_FOUND))
}

/// Full-field edit by an administrator.
pub async fn admin_update(
    state: &AppState,
    booking_id: Uuid,
    update: AdminBookingUpdate,
) -> Result<Booking, AppError> {
    sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET bride_name = $1,
            groom_name = $2,
            email = $3,
            phone_number = $4,
            wedding_date = $5,
            bride_address = $6,
            groom_address = $7,
            locations = $8,
            schedule = $9,
            additional_info = $10
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(update.bride_name)
    .bind(update.groom_name)
    .bind(update.email)
    .bind(update.phone_number)
    .bind(update.wedding_date)
    .bind(update.bride_address)
    .bind(update.groom_address)
    .bind(update.locations)
    .bind(update.schedule)
    .bind(update.additional_info)
    .bind(booking_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound(BOOKING_NOT_FOUND))
}
