//! Session Fingerprint Repository
//!
//! One row per account. Every login overwrites it.

use super::RepoResult;
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, account_id: i64) -> RepoResult<Option<String>> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT session_id FROM account_session WHERE account_id = ?")
            .bind(account_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(session_id,)| session_id))
}

/// Insert or overwrite the account's fingerprint
pub async fn upsert(
    pool: &SqlitePool,
    account_id: i64,
    session_id: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO account_session (account_id, session_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3) \
         ON CONFLICT(account_id) DO UPDATE SET session_id = excluded.session_id, updated_at = excluded.updated_at",
    )
    .bind(account_id)
    .bind(session_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}
