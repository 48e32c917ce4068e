//! Administrator and login models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Represents an administrator record from the database.
///
/// Created at bootstrap (or provisioned directly in the database) and
/// read-only for the service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLoginRequest {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ClientLoginRequest {
    /// Trimmed client code and verbatim password. Absent and empty values are
    /// both a `Validation` error.
    pub fn credentials(self) -> Result<(String, String), AppError> {
        login_pair(self.client_id, self.password)
            .ok_or_else(|| AppError::Validation("Client ID and password are required.".to_string()))
    }
}

/// Request body for `POST /api/admin/login`.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl AdminLoginRequest {
    pub fn credentials(self) -> Result<(String, String), AppError> {
        login_pair(self.email, self.password)
            .ok_or_else(|| AppError::Validation("Email and password are required.".to_string()))
    }
}

/// Returned by both login endpoints.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

fn login_pair(identifier: Option<String>, password: Option<String>) -> Option<(String, String)> {
    let identifier = identifier
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())?;
    let password = password.filter(|p| !p.is_empty())?;
    Some((identifier, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(client_id: Option<&str>, password: Option<&str>) -> ClientLoginRequest {
        ClientLoginRequest {
            client_id: client_id.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn test_client_credentials_trim_identifier() {
        let (client_id, password) = client(Some(" 0427 "), Some(" secret1 "))
            .credentials()
            .unwrap();

        assert_eq!(client_id, "0427");
        assert_eq!(password, " secret1 ");
    }

    #[test]
    fn test_blank_login_fields_are_missing() {
        for (client_id, password) in [
            (None, Some("secret1")),
            (Some("0427"), None),
            (Some(""), Some("secret1")),
            (Some("   "), Some("secret1")),
            (Some("0427"), Some("")),
        ] {
            let err = client(client_id, password).credentials().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{client_id:?} {password:?}");
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_admin_empty_email_is_missing() {
        let request: AdminLoginRequest =
            serde_json::from_value(serde_json::json!({ "email": "", "password": "pw" })).unwrap();

        assert!(matches!(request.credentials(), Err(AppError::Validation(_))));
    }
}
