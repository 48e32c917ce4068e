//! Postgres plumbing: the pool, schema migrations, the unit-of-work timeout,
//! code lookups against `bookings` / `access_keys`, and first-start seeding.

use crate::{
    config::Config, error::AppError, services::code_allocator::CodeRegistry, state::AppState,
};
use sqlx::{PgConnection, Pool, Postgres};
use std::{future::Future, time::Duration};

pub type DbPool = Pool<Postgres>;

/// Unique constraint on `bookings.client_code`.
pub const CLIENT_CODE_CONSTRAINT: &str = "bookings_client_code_key";

/// Unique constraint on `access_keys.code`.
pub const ACCESS_KEY_CODE_CONSTRAINT: &str = "access_keys_code_key";

/// Open the shared pool.
///
/// At most `DB_MAX_CONNECTIONS` connections; a request waiting longer than
/// `DB_ACQUIRE_TIMEOUT_SECS` for one fails with `sqlx::Error::PoolTimedOut`.
pub async fn create_pool(config: &Config) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout())
        .connect(&config.database_url)
        .await
}

/// Apply pending files from `migrations/`. Already applied ones are skipped.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Run one unit of work with an upper time bound.
///
/// When the limit is hit the future is dropped, which drops any open
/// `Transaction` inside it; sqlx rolls it back and returns the connection.
pub async fn within<T, F>(limit: Duration, work: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(limit, work)
        .await
        .map_err(|_| AppError::Timeout)?
}

/// Map an insert error to `CodeCollision` when it violated `constraint`.
pub fn collision_on(constraint: &str, err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation() && db.constraint() == Some(constraint) =>
        {
            AppError::CodeCollision
        }
        _ => AppError::Database(err),
    }
}

/// Codes stored in one column, checked on the caller's connection so the
/// lookup participates in the surrounding transaction.
pub struct TableCodes<'c> {
    conn: &'c mut PgConnection,
    exists_sql: &'static str,
}

impl<'c> TableCodes<'c> {
    pub fn client_codes(conn: &'c mut PgConnection) -> Self {
        Self {
            conn,
            exists_sql: "SELECT EXISTS(SELECT 1 FROM bookings WHERE client_code = $1)",
        }
    }

    pub fn access_keys(conn: &'c mut PgConnection) -> Self {
        Self {
            conn,
            exists_sql: "SELECT EXISTS(SELECT 1 FROM access_keys WHERE code = $1)",
        }
    }
}

impl CodeRegistry for TableCodes<'_> {
    fn contains(&mut self, code: &str) -> impl Future<Output = Result<bool, AppError>> + Send {
        let code = code.to_owned();
        async move {
            let exists: bool = sqlx::query_scalar(self.exists_sql)
                .bind(code)
                .fetch_one(&mut *self.conn)
                .await?;
            Ok(exists)
        }
    }
}

/// First-start data: an optional sample access key and a default admin.
///
/// Both steps are idempotent; restarting the server changes nothing once the
/// rows exist.
pub async fn bootstrap(state: &AppState, config: &Config) -> Result<(), AppError> {
    if let Some(code) = config.seed_access_key.as_deref() {
        let inserted = sqlx::query(
            "INSERT INTO access_keys (code, owner_label) VALUES ($1, $2) ON CONFLICT (code) DO NOTHING",
        )
        .bind(code)
        .bind(&config.seed_access_key_label)
        .execute(&state.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            tracing::info!(code, "Inserted sample access key");
        }
    }

    let admin_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(&state.pool)
        .await?;

    if admin_count == 0 {
        let (password, generated) = match config.default_admin_password.clone() {
            Some(password) => (password, false),
            None => (generate_admin_password(), true),
        };
        let password_hash = state.hasher.hash(&password).await?;

        sqlx::query("INSERT INTO admins (email, password_hash) VALUES ($1, $2)")
            .bind(&config.default_admin_email)
            .bind(password_hash)
            .execute(&state.pool)
            .await?;

        if generated {
            tracing::warn!(
                email = %config.default_admin_email,
                password = %password,
                "Created default admin with a generated password; change it after first login"
            );
        } else {
            tracing::info!(email = %config.default_admin_email, "Created default admin");
        }
    }

    Ok(())
}

fn generate_admin_password() -> String {
    use crate::services::code_allocator::CodeFormat;

    let format = CodeFormat {
        alphabet: b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789",
        length: 12,
    };
    format.generate(&mut rand::rng())
}
