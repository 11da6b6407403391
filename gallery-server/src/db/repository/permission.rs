//! Route Permission Repository

use super::RepoResult;
use shared::models::RouteGrant;
use sqlx::SqlitePool;

/// `(menu, action, route pattern)` tuples granted to an active role
///
/// Role names compare case-insensitively. Rows come back in stored order
/// (route_permission id, then privilege id); the resolver relies on it.
pub async fn find_route_grants(pool: &SqlitePool, access_name: &str) -> RepoResult<Vec<RouteGrant>> {
    let grants = sqlx::query_as::<_, RouteGrant>(
        "SELECT p.menu_id, p.action, rp.path \
         FROM access a \
         JOIN access_permission ap ON ap.access_id = a.id \
         JOIN privilege p ON p.id = ap.privilege_id \
         JOIN route_permission rp ON rp.privilege_id = p.id \
         WHERE a.name = ? COLLATE NOCASE AND a.status = 1 \
         ORDER BY rp.id, p.id",
    )
    .bind(access_name)
    .fetch_all(pool)
    .await?;
    Ok(grants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::*;
    use shared::models::PrivilegeAction;

    #[tokio::test]
    async fn test_route_grants_in_stored_order() {
        let pool = test_pool().await;
        insert_access(&pool, 1, "Editor").await;
        insert_menu(&pool, 5, 0, 1, 1, "/master/banner", false).await;
        insert_privilege(&pool, 20, 5, "view").await;
        insert_privilege(&pool, 21, 5, "update").await;
        insert_route(&pool, 2, 21, "/master/banner/:id").await;
        insert_route(&pool, 1, 20, "/master/banner").await;
        grant(&pool, 1, 20).await;
        grant(&pool, 1, 21).await;

        let grants = find_route_grants(&pool, "editor").await.unwrap();
        assert_eq!(
            grants,
            vec![
                RouteGrant {
                    menu_id: 5,
                    action: PrivilegeAction::View,
                    path: "/master/banner".to_string(),
                },
                RouteGrant {
                    menu_id: 5,
                    action: PrivilegeAction::Update,
                    path: "/master/banner/:id".to_string(),
                },
            ]
        );

        assert!(find_route_grants(&pool, "Viewer").await.unwrap().is_empty());
    }
}
