//! Access key service - minting, lookup and removal of access keys.

use crate::{
    db::{self, ACCESS_KEY_CODE_CONSTRAINT, TableCodes},
    error::AppError,
    models::access_key::AccessKey,
    state::AppState,
};
use uuid::Uuid;

/// Mint a new access key with a freshly allocated 6-character code.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Allocate a code not present in `access_keys`
/// 3. Insert the row
/// 4. Commit; a collision at insert time rolls back and repeats 1-3
pub async fn create_access_key(
    state: &AppState,
    owner_label: Option<String>,
) -> Result<AccessKey, AppError> {
    let owner_label = owner_label.filter(|label| !label.trim().is_empty());

    let pool = &state.pool;
    let allocator = &state.access_key_codes;
    let owner_label = owner_label.as_deref();

    let key = db::within(
        state.unit_of_work_timeout,
        allocator.insert_unique(move || async move {
            let mut tx = pool.begin().await?;

            let code = allocator
                .allocate(&mut TableCodes::access_keys(&mut *tx))
                .await?;

            let key = sqlx::query_as::<_, AccessKey>(
                r#"
                INSERT INTO access_keys (code, owner_label)
                VALUES ($1, $2)
                RETURNING id, code, owner_label, created_at
                "#,
            )
            .bind(code)
            .bind(owner_label)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db::collision_on(ACCESS_KEY_CODE_CONSTRAINT, e))?;

            tx.commit().await?;

            Ok(key)
        }),
    )
    .await?;

    tracing::info!(access_key_id = %key.id, "Access key created");

    Ok(key)
}

/// Whether a key with this exact code exists.
pub async fn key_exists(state: &AppState, code: &str) -> Result<bool, AppError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM access_keys WHERE code = $1)")
            .bind(code)
            .fetch_one(&state.pool)
            .await?;

    Ok(exists)
}

/// All access keys, newest first.
pub async fn list_access_keys(state: &AppState) -> Result<Vec<AccessKey>, AppError> {
    let keys = sqlx::query_as::<_, AccessKey>(
        "SELECT id, code, owner_label, created_at FROM access_keys ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(keys)
}

/// Delete an access key. Bookings keep the code they were created with.
pub async fn delete_access_key(state: &AppState, key_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM access_keys WHERE id = $1")
        .bind(key_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Access key not found"));
    }

    Ok(())
}
