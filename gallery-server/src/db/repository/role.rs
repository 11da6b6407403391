//! Role Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{PageQuery, Role, RoleGrant, RoleOption};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Role to insert or overwrite, names already normalized
#[derive(Debug, Clone)]
pub struct RoleWrite {
    pub name: String,
    pub description: Option<String>,
    pub status: i64,
    pub privilege_ids: Vec<i64>,
}

const ROLE_COLUMNS: &str = "id, name, description, is_show, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!("SELECT {ROLE_COLUMNS} FROM access WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(role)
}

pub async fn find_grants(pool: &SqlitePool, id: i64) -> RepoResult<Vec<RoleGrant>> {
    let grants = sqlx::query_as::<_, RoleGrant>(
        "SELECT p.id AS privilege_id, p.menu_id, m.name AS menu_name, p.action \
         FROM access_permission ap \
         JOIN privilege p ON p.id = ap.privilege_id \
         JOIN menu m ON m.id = p.menu_id \
         WHERE ap.access_id = ? \
         ORDER BY m.level, m.sort, m.id, p.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;
    Ok(grants)
}

/// Active roles that are listed in pickers
pub async fn find_options(pool: &SqlitePool) -> RepoResult<Vec<RoleOption>> {
    let options = sqlx::query_as::<_, RoleOption>(
        "SELECT id, name FROM access WHERE status = 1 AND is_show = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(options)
}

fn order_column(order_by: Option<&str>) -> &'static str {
    match order_by {
        Some("name") => "name",
        Some("status") => "status",
        Some("updated_at") => "updated_at",
        _ => "created_at",
    }
}

/// One page of roles plus the total match count
pub async fn list(pool: &SqlitePool, query: &PageQuery) -> RepoResult<(Vec<Role>, i64)> {
    let pattern = query.search_term().map(|s| format!("%{s}%"));
    let filter = "WHERE is_show = 1 AND (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR name LIKE ?2 OR description LIKE ?2)";

    let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM access {filter}"))
        .bind(query.status)
        .bind(pattern.as_deref())
        .fetch_one(pool)
        .await?;

    let sql = format!(
        "SELECT {ROLE_COLUMNS} FROM access {filter} ORDER BY {} {}, id LIMIT ?3 OFFSET ?4",
        order_column(query.order_by.as_deref()),
        query.sort.unwrap_or_default().as_sql(),
    );
    let roles = sqlx::query_as::<_, Role>(&sql)
        .bind(query.status)
        .bind(pattern.as_deref())
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    Ok((roles, total))
}

/// Case-insensitive name check, optionally ignoring one role
pub async fn name_exists(pool: &SqlitePool, name: &str, except_id: Option<i64>) -> RepoResult<bool> {
    let found: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM access WHERE name = ?1 COLLATE NOCASE AND (?2 IS NULL OR id <> ?2) LIMIT 1",
    )
    .bind(name)
    .bind(except_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

async fn ensure_privileges_exist(
    tx: &mut Transaction<'_, Sqlite>,
    privilege_ids: &[i64],
) -> RepoResult<()> {
    for id in privilege_ids {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM privilege WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        if found.is_none() {
            return Err(RepoError::Business(
                ErrorCode::PrivilegeNotFound,
                format!("Privilege {id} not found"),
            ));
        }
    }
    Ok(())
}

async fn insert_grants(
    tx: &mut Transaction<'_, Sqlite>,
    access_id: i64,
    privilege_ids: &[i64],
    actor: Option<i64>,
    now: i64,
) -> RepoResult<()> {
    for privilege_id in privilege_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO access_permission (access_id, privilege_id, created_by, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(access_id)
        .bind(privilege_id)
        .bind(actor)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Insert a role and its grants in one transaction
pub async fn create(
    pool: &SqlitePool,
    data: &RoleWrite,
    actor: Option<i64>,
    now: i64,
) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;
    ensure_privileges_exist(&mut tx, &data.privilege_ids).await?;

    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO access (name, description, is_show, status, created_by, updated_by, created_at, updated_at) VALUES (?1, ?2, 1, ?3, ?4, ?4, ?5, ?5) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.status)
    .bind(actor)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    insert_grants(&mut tx, id, &data.privilege_ids, actor, now).await?;
    tx.commit().await?;
    Ok(id)
}

/// Overwrite a role and replace its grants in one transaction
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &RoleWrite,
    actor: Option<i64>,
    now: i64,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    ensure_privileges_exist(&mut tx, &data.privilege_ids).await?;

    let rows = sqlx::query(
        "UPDATE access SET name = ?, description = ?, status = ?, updated_by = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.status)
    .bind(actor)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Role {id} not found")));
    }

    sqlx::query("DELETE FROM access_permission WHERE access_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_grants(&mut tx, id, &data.privilege_ids, actor, now).await?;

    tx.commit().await?;
    Ok(())
}
