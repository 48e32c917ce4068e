//! Access key model.
//!
//! Access keys are short codes handed out to prospective clients; a client
//! needs one to reach the booking form. They are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an access key record from the database.
///
/// # Database Table
///
/// Maps to the `access_keys` table with columns:
/// - `id`: Unique identifier (UUID)
/// - `code`: The key itself, unique across all rows
/// - `owner_label`: Who the key was issued to
/// - `created_at`: When the key was created
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    pub id: Uuid,

    /// Six upper-case alphanumerics for generated keys. Seeded keys may differ.
    pub code: String,

    pub owner_label: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/admin/access-keys`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessKeyRequest {
    #[serde(default)]
    pub owner_label: Option<String>,
}

/// Request body for `POST /api/validate-key`.
#[derive(Debug, Deserialize)]
pub struct ValidateKeyRequest {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateKeyResponse {
    pub valid: bool,
    pub message: &'static str,
}
