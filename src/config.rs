//! Runtime settings, read from the process environment (plus an optional
//! `.env`) with `envy` and checked once before anything else starts.

use serde::Deserialize;
use std::time::Duration;

/// Server settings. Field `foo_bar` is read from `FOO_BAR`.
///
/// `DATABASE_URL`, `JWT_SECRET` and `ADMIN_JWT_SECRET` are required; every
/// other key falls back to its `default_*` function.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub jwt_secret: String,

    pub admin_jwt_secret: String,

    /// Lifetime of every issued session token.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Random draws per allocation before giving up with `AllocationExhausted`.
    #[serde(default = "default_code_allocation_attempts")]
    pub code_allocation_attempts: u32,

    /// Full allocate-and-insert cycles tried when the insert itself hits the
    /// unique constraint.
    #[serde(default = "default_code_insert_retries")]
    pub code_insert_retries: u32,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Upper bound for any single transactional unit of work.
    #[serde(default = "default_unit_of_work_timeout_secs")]
    pub unit_of_work_timeout_secs: u64,

    #[serde(default = "default_admin_email")]
    pub default_admin_email: String,

    /// Password for the bootstrap admin. Generated and logged once when unset.
    #[serde(default)]
    pub default_admin_password: Option<String>,

    /// Access key inserted at startup if missing (handy for local setups).
    #[serde(default)]
    pub seed_access_key: Option<String>,

    #[serde(default = "default_seed_access_key_label")]
    pub seed_access_key_label: String,
}

/// Reasons a loaded configuration is refused at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("{0} must not be empty")]
    EmptySecret(&'static str),

    #[error("JWT_SECRET and ADMIN_JWT_SECRET must differ")]
    SharedSecret,

    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    BcryptCost(u32),

    #[error("{0} must be at least 1")]
    ZeroBudget(&'static str),
}

fn default_port() -> u16 {
    3000
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_code_allocation_attempts() -> u32 {
    1000
}

fn default_code_insert_retries() -> u32 {
    3
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_db_acquire_timeout_secs() -> u64 {
    5
}

fn default_unit_of_work_timeout_secs() -> u64 {
    10
}

fn default_admin_email() -> String {
    "admin@dreamcatcher.com".to_string()
}

fn default_seed_access_key_label() -> String {
    "Test Client".to_string()
}

impl Config {
    /// Read `.env` if present, then the environment, then [`Config::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints envy cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret("JWT_SECRET"));
        }
        if self.admin_jwt_secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret("ADMIN_JWT_SECRET"));
        }
        if self.jwt_secret == self.admin_jwt_secret {
            return Err(ConfigError::SharedSecret);
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::BcryptCost(self.bcrypt_cost));
        }
        if self.code_allocation_attempts == 0 {
            return Err(ConfigError::ZeroBudget("CODE_ALLOCATION_ATTEMPTS"));
        }
        if self.code_insert_retries == 0 {
            return Err(ConfigError::ZeroBudget("CODE_INSERT_RETRIES"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(ConfigError::ZeroBudget("TOKEN_TTL_HOURS"));
        }
        if self.unit_of_work_timeout_secs == 0 {
            return Err(ConfigError::ZeroBudget("UNIT_OF_WORK_TIMEOUT_SECS"));
        }
        Ok(())
    }

    pub fn unit_of_work_timeout(&self) -> Duration {
        Duration::from_secs(self.unit_of_work_timeout_secs)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    /// Configuration suitable for tests: cheap bcrypt cost, distinct secrets.
    pub fn for_tests(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            server_port: default_port(),
            jwt_secret: "client-test-secret-at-least-32-characters".to_string(),
            admin_jwt_secret: "admin-test-secret-at-least-32-characters".to_string(),
            token_ttl_hours: default_token_ttl_hours(),
            bcrypt_cost: 4,
            code_allocation_attempts: default_code_allocation_attempts(),
            code_insert_retries: default_code_insert_retries(),
            db_max_connections: default_db_max_connections(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            unit_of_work_timeout_secs: default_unit_of_work_timeout_secs(),
            default_admin_email: default_admin_email(),
            default_admin_password: None,
            seed_access_key: None,
            seed_access_key_label: default_seed_access_key_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_is_valid() {
        assert!(Config::for_tests("postgres://localhost/test").validate().is_ok());
    }

    #[test]
    fn test_shared_secret_rejected() {
        let mut config = Config::for_tests("postgres://localhost/test");
        config.admin_jwt_secret = config.jwt_secret.clone();

        assert!(matches!(config.validate(), Err(ConfigError::SharedSecret)));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = Config::for_tests("postgres://localhost/test");
        config.jwt_secret = "  ".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySecret("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut config = Config::for_tests("postgres://localhost/test");
        config.bcrypt_cost = 3;
        assert!(matches!(config.validate(), Err(ConfigError::BcryptCost(3))));

        config.bcrypt_cost = 32;
        assert!(matches!(config.validate(), Err(ConfigError::BcryptCost(32))));
    }

    #[test]
    fn test_zero_retry_budget_rejected() {
        let mut config = Config::for_tests("postgres://localhost/test");
        config.code_allocation_attempts = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroBudget("CODE_ALLOCATION_ATTEMPTS"))
        ));
    }
}
