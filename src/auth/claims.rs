//! Principals and the JWT claim envelope.
//!
//! Each principal kind has its own [`TokenDomain`]: a separate signing secret,
//! a separate audience value and a separate claim shape.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// A family of tokens that can only be verified by its own service.
pub trait TokenDomain: Clone + Send + Sync + 'static {
    /// Written to and required in the `aud` claim.
    const AUDIENCE: &'static str;

    /// Who the token speaks for.
    type Principal: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;
}

/// Tokens issued to clients after logging in with their client code.
#[derive(Debug, Clone, Copy)]
pub struct ClientDomain;

/// Tokens issued to administrators.
#[derive(Debug, Clone, Copy)]
pub struct AdminDomain;

impl TokenDomain for ClientDomain {
    const AUDIENCE: &'static str = "client";
    type Principal = ClientPrincipal;
}

impl TokenDomain for AdminDomain {
    const AUDIENCE: &'static str = "admin";
    type Principal = AdminPrincipal;
}

/// An authenticated client. Carries the opaque client code only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientPrincipal {
    pub client_code: String,
}

/// An authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminPrincipal {
    pub id: Uuid,
    pub email: String,
}

/// JWT payload: the principal plus standard registered claims (RFC 7519).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims<P> {
    pub principal: P,
    /// Audience (token domain)
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
