//! Account Repository

use super::{RepoError, RepoResult};
use shared::models::{Account, AccountUpdate, PageQuery};
use sqlx::SqlitePool;

/// Login lookup projection, includes the password hash
#[derive(Clone, sqlx::FromRow)]
pub struct AccountCredential {
    pub id: i64,
    pub access_id: i64,
    pub access_name: String,
    pub username: String,
    pub fullname: String,
    pub password: String,
}

impl std::fmt::Debug for AccountCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCredential")
            .field("id", &self.id)
            .field("access_id", &self.access_id)
            .field("access_name", &self.access_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// `{id, name, access_name}` of an account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountProfile {
    pub id: i64,
    pub name: String,
    pub access_name: String,
}

/// Account to insert, password already hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub access_id: i64,
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

const ACCOUNT_SELECT: &str = "SELECT a.id, a.access_id, r.name AS access_name, a.username, a.fullname, a.email, a.phone, a.status, a.created_at, a.updated_at FROM account a JOIN access r ON r.id = a.access_id";

/// Active account with an active role, username compared case-sensitively
pub async fn find_credential(
    pool: &SqlitePool,
    username: &str,
) -> RepoResult<Option<AccountCredential>> {
    let row = sqlx::query_as::<_, AccountCredential>(
        "SELECT a.id, a.access_id, r.name AS access_name, a.username, a.fullname, a.password FROM account a JOIN access r ON r.id = a.access_id WHERE a.username = ? AND a.status = 1 AND r.status = 1 LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_profile(pool: &SqlitePool, id: i64) -> RepoResult<Option<AccountProfile>> {
    let row = sqlx::query_as::<_, AccountProfile>(
        "SELECT a.id, a.fullname AS name, r.name AS access_name FROM account a JOIN access r ON r.id = a.access_id WHERE a.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// 账号当前的角色名，账号和角色都须启用
pub async fn find_active_access_name(pool: &SqlitePool, id: i64) -> RepoResult<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT r.name FROM account a JOIN access r ON r.id = a.access_id WHERE a.id = ? AND a.status = 1 AND r.status = 1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(name,)| name))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(&format!("{ACCOUNT_SELECT} WHERE a.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(account)
}

/// Case-insensitive username check
pub async fn username_exists(pool: &SqlitePool, username: &str) -> RepoResult<bool> {
    let found: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM account WHERE username = ? COLLATE NOCASE LIMIT 1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}

fn order_column(order_by: Option<&str>) -> &'static str {
    match order_by {
        Some("username") => "a.username",
        Some("fullname") => "a.fullname",
        Some("status") => "a.status",
        Some("access_name") => "r.name",
        _ => "a.created_at",
    }
}

/// One page of accounts plus the total match count
pub async fn list(pool: &SqlitePool, query: &PageQuery) -> RepoResult<(Vec<Account>, i64)> {
    let pattern = query.search_term().map(|s| format!("%{s}%"));
    let filter = "WHERE (?1 IS NULL OR a.status = ?1) AND (?2 IS NULL OR a.username LIKE ?2 OR a.fullname LIKE ?2)";

    let (total,): (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM account a JOIN access r ON r.id = a.access_id {filter}"
    ))
    .bind(query.status)
    .bind(pattern.as_deref())
    .fetch_one(pool)
    .await?;

    let sql = format!(
        "{ACCOUNT_SELECT} {filter} ORDER BY {} {}, a.id LIMIT ?3 OFFSET ?4",
        order_column(query.order_by.as_deref()),
        query.sort.unwrap_or_default().as_sql(),
    );
    let accounts = sqlx::query_as::<_, Account>(&sql)
        .bind(query.status)
        .bind(pattern.as_deref())
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    Ok((accounts, total))
}

pub async fn create(
    pool: &SqlitePool,
    data: NewAccount,
    created_by: Option<i64>,
    now: i64,
) -> RepoResult<i64> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO account (access_id, username, password, fullname, email, phone, status, created_by, updated_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7, ?8, ?8) RETURNING id",
    )
    .bind(data.access_id)
    .bind(&data.username)
    .bind(&data.password_hash)
    .bind(&data.fullname)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(created_by)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update(
    pool: &SqlitePool,
    data: &AccountUpdate,
    fullname: &str,
    phone: Option<&str>,
    updated_by: Option<i64>,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE account SET access_id = ?1, fullname = ?2, email = ?3, phone = ?4, status = ?5, updated_by = ?6, updated_at = ?7 WHERE id = ?8",
    )
    .bind(data.access_id)
    .bind(fullname)
    .bind(&data.email)
    .bind(phone)
    .bind(data.status)
    .bind(updated_by)
    .bind(now)
    .bind(data.id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {} not found", data.id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::*;

    #[tokio::test]
    async fn test_find_credential_is_case_sensitive_and_active_only() {
        let pool = test_pool().await;
        insert_access(&pool, 1, "Superuser").await;
        insert_account(&pool, 1, 1, "admin").await;
        insert_account(&pool, 2, 1, "retired").await;
        sqlx::query("UPDATE account SET status = 0 WHERE id = 2")
            .execute(&pool)
            .await
            .unwrap();

        let found = find_credential(&pool, "admin").await.unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.access_name, "Superuser");

        assert!(find_credential(&pool, "ADMIN").await.unwrap().is_none());
        assert!(find_credential(&pool, "retired").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inactive_role_hides_credential() {
        let pool = test_pool().await;
        insert_access(&pool, 1, "Editor").await;
        insert_account(&pool, 1, 1, "editor").await;
        sqlx::query("UPDATE access SET status = 0 WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        assert!(find_credential(&pool, "editor").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_active_access_name_follows_current_role() {
        let pool = test_pool().await;
        insert_access(&pool, 1, "Editor").await;
        insert_access(&pool, 2, "Viewer").await;
        insert_account(&pool, 1, 1, "admin").await;

        assert_eq!(
            find_active_access_name(&pool, 1).await.unwrap().as_deref(),
            Some("Editor")
        );

        sqlx::query("UPDATE account SET access_id = 2 WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();
        assert_eq!(
            find_active_access_name(&pool, 1).await.unwrap().as_deref(),
            Some("Viewer")
        );

        sqlx::query("UPDATE access SET status = 0 WHERE id = 2")
            .execute(&pool)
            .await
            .unwrap();
        assert!(find_active_access_name(&pool, 1).await.unwrap().is_none());
        assert!(find_active_access_name(&pool, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_exists_ignores_case() {
        let pool = test_pool().await;
        insert_access(&pool, 1, "Superuser").await;
        insert_account(&pool, 1, 1, "Admin").await;

        assert!(username_exists(&pool, "admin").await.unwrap());
        assert!(!username_exists(&pool, "curator").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_and_counts() {
        let pool = test_pool().await;
        insert_access(&pool, 1, "Superuser").await;
        insert_account(&pool, 1, 1, "alice").await;
        insert_account(&pool, 2, 1, "bob").await;
        insert_account(&pool, 3, 1, "alicia").await;

        let query = PageQuery {
            search: Some("ali".to_string()),
            order_by: Some("username".to_string()),
            sort: Some(shared::models::SortOrder::Asc),
            ..Default::default()
        };
        let (items, total) = list(&pool, &query).await.unwrap();
        assert_eq!(total, 2);
        let names: Vec<&str> = items.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "alicia"]);
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let pool = test_pool().await;
        let data = AccountUpdate {
            id: 99,
            access_id: 1,
            fullname: "Nobody".to_string(),
            email: None,
            phone: None,
            status: 1,
        };
        let err = update(&pool, &data, "Nobody", None, None, 0).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
