//! Password hashing and verification with bcrypt.
//!
//! bcrypt does all its work synchronously, so every call runs on tokio's
//! blocking pool instead of a runtime worker.

use crate::error::AppError;

/// bcrypt ignores input past this many bytes. Longer passwords are refused
/// so two passwords sharing a 72-byte prefix never verify against each other.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Salted bcrypt hashing at a fixed work factor.
///
/// The digest embeds its own salt and cost, so verification works for hashes
/// produced at any cost even after `BCRYPT_COST` changes.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// - `Validation` if the password is longer than [`MAX_PASSWORD_BYTES`]
    /// - `Internal` if bcrypt rejects the cost or the blocking task dies
    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }

        let cost = self.cost;
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// A digest that cannot be parsed counts as a mismatch; the failure is
    /// logged without the digest itself. Stored digests never come from
    /// passwords over [`MAX_PASSWORD_BYTES`], so such input never matches.
    pub async fn verify(&self, password: &str, digest: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return self.verify_absent(password).await;
        }

        let password = password.to_owned();
        let digest = digest.to_owned();

        match tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "stored password hash is unreadable");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            }
        }
    }

    /// Do one bcrypt round at the configured cost and report a mismatch.
    ///
    /// Login uses this when the identifier is unknown, so that path takes as
    /// long as a wrong password.
    pub async fn verify_absent(&self, password: &str) -> bool {
        let cost = self.cost;
        let password = password.to_owned();

        if let Err(e) = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await {
            tracing::error!(error = %e, "password verification task failed");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[tokio::test]
    async fn test_hash_is_not_plaintext() {
        let hash = hasher()
            .hash("secret1")
            .await
            .expect("Failed to hash password");

        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hasher().hash("secret1").await.unwrap();
        let second = hasher().hash("secret1").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_password() {
        let hasher = hasher();
        for password in ["secret1", "zażółć gęślą jaźń", "with spaces  "] {
            let hash = hasher.hash(password).await.unwrap();
            assert!(hasher.verify(password, &hash).await, "{password:?}");
        }
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").await.unwrap();

        assert!(!hasher.verify("secret2", &hash).await);
        assert!(!hasher.verify("Secret1", &hash).await);
        assert!(!hasher.verify("", &hash).await);
    }

    #[tokio::test]
    async fn test_malformed_digest_is_mismatch() {
        let hasher = hasher();

        assert!(!hasher.verify("secret1", "not-a-bcrypt-hash").await);
        assert!(!hasher.verify("secret1", "").await);
        assert!(!hasher.verify("secret1", "$2b$04$truncated").await);
    }

    #[tokio::test]
    async fn test_verify_hash_from_other_cost() {
        let hash = PasswordHasher::new(5).hash("secret1").await.unwrap();

        assert!(hasher().verify("secret1", &hash).await);
    }

    #[tokio::test]
    async fn test_password_over_limit_is_rejected() {
        let long = "A".repeat(MAX_PASSWORD_BYTES) + "first";

        assert!(matches!(
            hasher().hash(&long).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_shared_prefix_does_not_verify() {
        let hasher = hasher();
        let at_limit = "A".repeat(MAX_PASSWORD_BYTES);
        let hash = hasher.hash(&at_limit).await.unwrap();

        assert!(hasher.verify(&at_limit, &hash).await);
        assert!(!hasher.verify(&(at_limit.clone() + "second"), &hash).await);
        assert!(!hasher.verify(&at_limit[1..], &hash).await);
    }

    #[tokio::test]
    async fn test_verify_absent_costs_a_bcrypt_round() {
        let hasher = PasswordHasher::new(8);
        let hash = hasher.hash("secret1").await.unwrap();

        let started = Instant::now();
        assert!(!hasher.verify("wrong", &hash).await);
        let wrong_password = started.elapsed();

        let started = Instant::now();
        assert!(!hasher.verify_absent("wrong").await);
        let unknown_user = started.elapsed();

        assert!(
            unknown_user * 4 >= wrong_password,
            "unknown {unknown_user:?} vs wrong {wrong_password:?}"
        );
    }
}
