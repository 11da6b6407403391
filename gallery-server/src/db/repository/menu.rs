//! Menu Repository
//!
//! Row queries feeding the tree builder keep the `level, sort, id` order.

use super::{RepoError, RepoResult};
use shared::models::{Menu, MenuRow, MenuUpdate};
use sqlx::SqlitePool;

/// Every active menu with all of its privileges
pub async fn find_all_rows(pool: &SqlitePool) -> RepoResult<Vec<MenuRow>> {
    let rows = sqlx::query_as::<_, MenuRow>(
        "SELECT m.id, m.name, m.path, m.icon, m.level, m.parent_id, m.sort, m.is_group, \
                p.id AS privilege_id, p.action AS action \
         FROM menu m \
         LEFT JOIN privilege p ON p.menu_id = m.id \
         WHERE m.status = 1 \
         ORDER BY m.level, m.sort, m.id, p.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Menus granted to the account's role plus their ancestors,
/// annotated with the granted privileges only
///
/// Inactive accounts and inactive roles see nothing.
pub async fn find_rows_for_account(pool: &SqlitePool, account_id: i64) -> RepoResult<Vec<MenuRow>> {
    let rows = sqlx::query_as::<_, MenuRow>(
        "WITH RECURSIVE granted(privilege_id, menu_id) AS ( \
             SELECT p.id, p.menu_id \
             FROM account a \
             JOIN access r ON r.id = a.access_id AND r.status = 1 \
             JOIN access_permission ap ON ap.access_id = a.access_id \
             JOIN privilege p ON p.id = ap.privilege_id \
             WHERE a.id = ?1 AND a.status = 1 \
         ), \
         visible(id) AS ( \
             SELECT menu_id FROM granted \
             UNION \
             SELECT m.parent_id FROM menu m JOIN visible v ON m.id = v.id WHERE m.parent_id <> 0 \
         ) \
         SELECT m.id, m.name, m.path, m.icon, m.level, m.parent_id, m.sort, m.is_group, \
                g.privilege_id AS privilege_id, p.action AS action \
         FROM menu m \
         JOIN visible v ON v.id = m.id \
         LEFT JOIN granted g ON g.menu_id = m.id \
         LEFT JOIN privilege p ON p.id = g.privilege_id \
         WHERE m.status = 1 \
         ORDER BY m.level, m.sort, m.id, g.privilege_id",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// First navigable (non-group) menu path granted to a role
pub async fn first_path_for_access(pool: &SqlitePool, access_id: i64) -> RepoResult<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT m.path FROM menu m \
         WHERE m.status = 1 AND m.is_group = 0 AND m.path <> '' \
           AND EXISTS ( \
               SELECT 1 FROM privilege p \
               JOIN access_permission ap ON ap.privilege_id = p.id \
               WHERE p.menu_id = m.id AND ap.access_id = ? \
           ) \
         ORDER BY m.level, m.sort, m.id \
         LIMIT 1",
    )
    .bind(access_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(path,)| path))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Menu>> {
    let menu = sqlx::query_as::<_, Menu>(
        "SELECT id, name, path, icon, level, parent_id, sort, is_group, status FROM menu WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(menu)
}

/// Rename, reorder or toggle a menu
pub async fn update(pool: &SqlitePool, data: &MenuUpdate, now: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE menu SET name = ?, sort = ?, status = ?, updated_at = ? WHERE id = ?")
        .bind(&data.name)
        .bind(data.sort)
        .bind(data.status)
        .bind(now)
        .bind(data.id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu {} not found", data.id)));
    }
    Ok(())
}
