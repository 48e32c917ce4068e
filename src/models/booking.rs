//! Booking data models and API request/response types.
//!
//! This module defines:
//! - `Booking`: Database entity representing a client booking
//! - `CreateBookingRequest` / `NewBooking`: client submission before and after validation
//! - `UpdateMyBookingRequest`: self-service edit by the owning client
//! - `AdminUpdateBookingRequest` / `AdminBookingUpdate`: full-field edit by an administrator
//! - `BookingResponse` / `BookingSummary`: what clients and admins get back
//!
//! # Price Storage
//!
//! Prices arrive as JSON numbers (`5500`, `5499.99`) and are stored as `i64`
//! cents to avoid floating-point drift in the database.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{auth::password::MAX_PASSWORD_BYTES, error::AppError};

/// Represents a booking record from the database.
///
/// # Database Table
///
/// Maps to the `bookings` table. `client_code` is unique across all rows and
/// doubles as the client's login identifier.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub client_code: String,

    /// bcrypt digest; never serialized.
    pub password_hash: String,

    /// Access key the client used to reach the booking form
    pub access_key: String,
    pub package_name: String,
    pub total_price_cents: i64,
    pub selected_items: Option<Value>,
    pub bride_name: Option<String>,
    pub groom_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub bride_address: Option<String>,
    pub groom_address: Option<String>,
    pub locations: Option<String>,
    pub schedule: Option<String>,
    pub email: String,
    pub phone_number: String,
    pub additional_info: Option<String>,
    pub discount_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for submitting a booking.
///
/// # JSON Example
///
/// ```json
/// {
///   "accessKey": "1234",
///   "password": "secret1",
///   "packageName": "Gold",
///   "totalPrice": 5500,
///   "selectedItems": [{"name": "Drone", "price": 500}],
///   "brideName": "Anna",
///   "groomName": "Jan",
///   "weddingDate": "2026-06-20",
///   "email": "a@b.com",
///   "phoneNumber": "555"
/// }
/// ```
///
/// # Validation
///
/// `accessKey`, `password`, `packageName`, `totalPrice`, `email` and
/// `phoneNumber` are required; everything else is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub selected_items: Option<Value>,
    #[serde(default)]
    pub bride_name: Option<String>,
    #[serde(default)]
    pub groom_name: Option<String>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub wedding_date: Option<NaiveDate>,
    #[serde(default)]
    pub bride_address: Option<String>,
    #[serde(default)]
    pub groom_address: Option<String>,
    #[serde(default)]
    pub locations: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub discount_code: Option<String>,
}

/// A booking submission that passed validation.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub access_key: String,
    pub password: String,
    pub package_name: String,
    pub total_price_cents: i64,
    pub selected_items: Option<Value>,
    pub bride_name: Option<String>,
    pub groom_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub bride_address: Option<String>,
    pub groom_address: Option<String>,
    pub locations: Option<String>,
    pub schedule: Option<String>,
    pub email: String,
    pub phone_number: String,
    pub additional_info: Option<String>,
    pub discount_code: Option<String>,
}

impl CreateBookingRequest {
    /// Check required fields and normalize the optional ones.
    ///
    /// # Errors
    ///
    /// `Validation` naming the first missing field.
    pub fn validate(self) -> Result<NewBooking, AppError> {
        let access_key = required(self.access_key, "accessKey")?;
        // Passwords are taken verbatim, never trimmed.
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| missing("password"))?;
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        let package_name = required(self.package_name, "packageName")?;
        let total_price_cents = self
            .total_price
            .ok_or_else(|| missing("totalPrice"))
            .and_then(price_to_cents)?;
        let email = required(self.email, "email")?;
        let phone_number = required(self.phone_number, "phoneNumber")?;

        Ok(NewBooking {
            access_key,
            password,
            package_name,
            total_price_cents,
            selected_items: self.selected_items,
            bride_name: optional(self.bride_name),
            groom_name: optional(self.groom_name),
            wedding_date: self.wedding_date,
            bride_address: optional(self.bride_address),
            groom_address: optional(self.groom_address),
            locations: optional(self.locations),
            schedule: optional(self.schedule),
            email,
            phone_number,
            additional_info: optional(self.additional_info),
            discount_code: optional(self.discount_code),
        })
    }
}

/// Identifiers generated for a new booking.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CreatedBooking {
    pub id: Uuid,
    pub client_code: String,
}

/// Response body for `POST /api/bookings`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedResponse {
    pub message: &'static str,
    pub booking_id: Uuid,
    pub client_id: String,
}

impl From<CreatedBooking> for BookingCreatedResponse {
    fn from(created: CreatedBooking) -> Self {
        Self {
            message: "Booking created successfully.",
            booking_id: created.id,
            client_id: created.client_code,
        }
    }
}

/// Self-service edit. Every listed field is overwritten; absent means null.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMyBookingRequest {
    #[serde(default)]
    pub bride_address: Option<String>,
    #[serde(default)]
    pub groom_address: Option<String>,
    #[serde(default)]
    pub locations: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Administrator edit of party, contact and schedule fields.
#[derive(Debug, Default, Deserialize)]
pub struct AdminUpdateBookingRequest {
    #[serde(default)]
    pub bride_name: Option<String>,
    #[serde(default)]
    pub groom_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub wedding_date: Option<NaiveDate>,
    #[serde(default)]
    pub bride_address: Option<String>,
    #[serde(default)]
    pub groom_address: Option<String>,
    #[serde(default)]
    pub locations: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// An admin edit that passed validation.
#[derive(Debug, Clone)]
pub struct AdminBookingUpdate {
    pub bride_name: String,
    pub groom_name: String,
    pub email: String,
    pub phone_number: String,
    pub wedding_date: NaiveDate,
    pub bride_address: Option<String>,
    pub groom_address: Option<String>,
    pub locations: Option<String>,
    pub schedule: Option<String>,
    pub additional_info: Option<String>,
}

impl AdminUpdateBookingRequest {
    pub fn validate(self) -> Result<AdminBookingUpdate, AppError> {
        Ok(AdminBookingUpdate {
            bride_name: required(self.bride_name, "bride_name")?,
            groom_name: required(self.groom_name, "groom_name")?,
            email: required(self.email, "email")?,
            phone_number: required(self.phone_number, "phone_number")?,
            wedding_date: self.wedding_date.ok_or_else(|| missing("wedding_date"))?,
            bride_address: self.bride_address,
            groom_address: self.groom_address,
            locations: self.locations,
            schedule: self.schedule,
            additional_info: self.additional_info,
        })
    }
}

/// A booking as returned to its client or to an admin.
///
/// Same as `Booking` minus `password_hash`, with the price back in currency units.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub client_code: String,
    pub access_key: String,
    pub package_name: String,
    pub total_price: f64,
    pub selected_items: Option<Value>,
    pub bride_name: Option<String>,
    pub groom_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub bride_address: Option<String>,
    pub groom_address: Option<String>,
    pub locations: Option<String>,
    pub schedule: Option<String>,
    pub email: String,
    pub phone_number: String,
    pub additional_info: Option<String>,
    pub discount_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            client_code: booking.client_code,
            access_key: booking.access_key,
            package_name: booking.package_name,
            total_price: cents_to_price(booking.total_price_cents),
            selected_items: booking.selected_items,
            bride_name: booking.bride_name,
            groom_name: booking.groom_name,
            wedding_date: booking.wedding_date,
            bride_address: booking.bride_address,
            groom_address: booking.groom_address,
            locations: booking.locations,
            schedule: booking.schedule,
            email: booking.email,
            phone_number: booking.phone_number,
            additional_info: booking.additional_info,
            discount_code: booking.discount_code,
            created_at: booking.created_at,
        }
    }
}

/// Response body for the PATCH endpoints.
#[derive(Debug, Serialize)]
pub struct BookingUpdatedResponse {
    pub message: &'static str,
    pub booking: BookingResponse,
}

/// Row of the admin booking list.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingSummaryRow {
    pub id: Uuid,
    pub client_code: String,
    pub bride_name: Option<String>,
    pub groom_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub total_price_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingSummary {
    pub id: Uuid,
    pub client_code: String,
    pub bride_name: Option<String>,
    pub groom_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<BookingSummaryRow> for BookingSummary {
    fn from(row: BookingSummaryRow) -> Self {
        Self {
            id: row.id,
            client_code: row.client_code,
            bride_name: row.bride_name,
            groom_name: row.groom_name,
            wedding_date: row.wedding_date,
            total_price: cents_to_price(row.total_price_cents),
            created_at: row.created_at,
        }
    }
}

/// Forms send `""` for an untouched date input; that reads as no date.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Missing required field: {field}"))
}

/// A trimmed, non-empty string or a validation error.
fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing(field))
}

/// Blank strings are stored as null.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn price_to_cents(price: f64) -> Result<i64, AppError> {
    // Upper bound matches the old NUMERIC(10, 2) column.
    if !price.is_finite() || price <= 0.0 || price >= 100_000_000.0 {
        return Err(AppError::Validation(
            "totalPrice must be a positive amount".to_string(),
        ));
    }
    Ok((price * 100.0).round() as i64)
}

fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> CreateBookingRequest {
        CreateBookingRequest {
            access_key: Some("1234".into()),
            password: Some("secret1".into()),
            package_name: Some("Gold".into()),
            total_price: Some(5500.0),
            email: Some("a@b.com".into()),
            phone_number: Some("555".into()),
            ..Default::default()
        }
    }

    fn assert_missing(request: CreateBookingRequest, field: &str) {
        match request.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.contains(field), "{msg}"),
            other => panic!("expected validation error for {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_booking() {
        let booking = gold().validate().unwrap();

        assert_eq!(booking.package_name, "Gold");
        assert_eq!(booking.total_price_cents, 550_000);
        assert_eq!(booking.password, "secret1");
        assert!(booking.bride_name.is_none());
    }

    #[test]
    fn test_required_fields() {
        assert_missing(CreateBookingRequest { access_key: None, ..gold() }, "accessKey");
        assert_missing(CreateBookingRequest { password: None, ..gold() }, "password");
        assert_missing(
            CreateBookingRequest { package_name: Some("  ".into()), ..gold() },
            "packageName",
        );
        assert_missing(CreateBookingRequest { total_price: None, ..gold() }, "totalPrice");
        assert_missing(CreateBookingRequest { email: None, ..gold() }, "email");
        assert_missing(
            CreateBookingRequest { phone_number: Some(String::new()), ..gold() },
            "phoneNumber",
        );
    }

    #[test]
    fn test_price_must_be_positive() {
        for price in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert_missing(CreateBookingRequest { total_price: Some(price), ..gold() }, "totalPrice");
        }
    }

    #[test]
    fn test_price_rounds_to_cents() {
        let booking = CreateBookingRequest {
            total_price: Some(5499.999),
            ..gold()
        }
        .validate()
        .unwrap();

        assert_eq!(booking.total_price_cents, 550_000);
        assert_eq!(cents_to_price(549_999), 5499.99);
    }

    #[test]
    fn test_blank_optionals_become_null() {
        let booking = CreateBookingRequest {
            bride_name: Some("   ".into()),
            locations: Some("Kraków".into()),
            ..gold()
        }
        .validate()
        .unwrap();

        assert!(booking.bride_name.is_none());
        assert_eq!(booking.locations.as_deref(), Some("Kraków"));
    }

    #[test]
    fn test_camel_case_body() {
        let request: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "accessKey": "1234",
            "password": "secret1",
            "packageName": "Gold",
            "totalPrice": 5500,
            "email": "a@b.com",
            "phoneNumber": "555",
            "weddingDate": "2026-06-20",
            "selectedItems": [{"name": "Album"}]
        }))
        .unwrap();

        let booking = request.validate().unwrap();
        assert_eq!(booking.wedding_date, NaiveDate::from_ymd_opt(2026, 6, 20));
        assert!(booking.selected_items.is_some());
    }

    #[test]
    fn test_blank_wedding_date_is_null() {
        for blank in ["", "  "] {
            let request: CreateBookingRequest = serde_json::from_value(serde_json::json!({
                "accessKey": "1234",
                "password": "secret1",
                "packageName": "Gold",
                "totalPrice": 5500,
                "email": "a@b.com",
                "phoneNumber": "555",
                "weddingDate": blank
            }))
            .unwrap();

            assert_eq!(request.validate().unwrap().wedding_date, None);
        }

        let request: CreateBookingRequest =
            serde_json::from_value(serde_json::json!({ "weddingDate": null })).unwrap();
        assert_eq!(request.wedding_date, None);
    }

    #[test]
    fn test_malformed_wedding_date_is_rejected() {
        let parsed = serde_json::from_value::<CreateBookingRequest>(
            serde_json::json!({ "weddingDate": "20/06/2026" }),
        );

        assert!(parsed.is_err());
    }

    #[test]
    fn test_password_over_bcrypt_limit() {
        let at_limit = CreateBookingRequest {
            password: Some("p".repeat(MAX_PASSWORD_BYTES)),
            ..gold()
        };
        assert!(at_limit.validate().is_ok());

        let over = CreateBookingRequest {
            password: Some("p".repeat(MAX_PASSWORD_BYTES + 1)),
            ..gold()
        };
        assert_missing(over, "password");
    }

    #[test]
    fn test_admin_blank_wedding_date_is_missing() {
        let request: AdminUpdateBookingRequest = serde_json::from_value(serde_json::json!({
            "bride_name": "Anna",
            "groom_name": "Jan",
            "email": "a@b.com",
            "phone_number": "555",
            "wedding_date": ""
        }))
        .unwrap();

        assert_missing_admin(request, "wedding_date");
    }

    fn assert_missing_admin(request: AdminUpdateBookingRequest, field: &str) {
        match request.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.contains(field), "{msg}"),
            other => panic!("expected validation error for {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_admin_update_requires_core_fields() {
        let request = AdminUpdateBookingRequest {
            bride_name: Some("Anna".into()),
            groom_name: Some("Jan".into()),
            email: Some("a@b.com".into()),
            phone_number: Some("555".into()),
            wedding_date: None,
            ..Default::default()
        };

        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }
}
