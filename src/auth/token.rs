//! Signed, expiring session tokens.
//!
//! One [`TokenService`] exists per [`TokenDomain`]. Each instance signs with its
//! own secret and pins its own audience, so a token from one domain never
//! verifies in the other.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::{fmt, marker::PhantomData};

use crate::auth::claims::{Claims, TokenDomain};
use crate::error::AppError;

/// Clock skew tolerated when checking `exp`, in seconds.
const LEEWAY_SECS: u64 = 5;

/// Issues and verifies HS256 tokens for one domain.
#[derive(Clone)]
pub struct TokenService<D: TokenDomain> {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    _domain: PhantomData<fn() -> D>,
}

impl<D: TokenDomain> fmt::Debug for TokenService<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("audience", &D::AUDIENCE)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<D: TokenDomain> TokenService<D> {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[D::AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "aud"]);
        validation.leeway = LEEWAY_SECS;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            _domain: PhantomData,
        }
    }

    /// Sign a token for `principal`, valid for the configured lifetime.
    pub fn issue(&self, principal: &D::Principal) -> Result<String, AppError> {
        self.issue_at(principal, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        principal: &D::Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            principal: principal.clone(),
            aud: D::AUDIENCE.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Verify a token and return its principal.
    ///
    /// Every failure (bad encoding, bad signature, wrong audience, expiry,
    /// unexpected claim shape) yields `InvalidToken`. The reason is logged at
    /// debug level only.
    pub fn verify(&self, token: &str) -> Result<D::Principal, AppError> {
        decode::<Claims<D::Principal>>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.principal)
            .map_err(|e| {
                tracing::debug!(audience = D::AUDIENCE, reason = %e, "token rejected");
                AppError::InvalidToken
            })
    }
}
