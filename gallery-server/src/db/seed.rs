//! 初始数据
//!
//! 空库首次启动时写入默认菜单树、权限、路由规则、`Superuser` 角色和
//! `superuser` 账号。库中已有角色时不做任何事。

use sqlx::SqlitePool;

use super::repository::RepoResult;
use crate::auth::credential::hash_password;
use crate::utils::AppError;
use shared::models::PrivilegeAction;

/// 默认账号
pub const SEED_USERNAME: &str = "superuser";
/// 默认密码 (首次登录后应修改)
pub const SEED_PASSWORD: &str = "12345678";
/// 默认角色
pub const SEED_ROLE: &str = "Superuser";

struct SeedMenu {
    name: &'static str,
    path: &'static str,
    icon: &'static str,
    children: &'static [SeedMenu],
}

const fn leaf(name: &'static str, path: &'static str, icon: &'static str) -> SeedMenu {
    SeedMenu {
        name,
        path,
        icon,
        children: &[],
    }
}

const MENUS: &[SeedMenu] = &[
    leaf("Dashboard", "/dashboard", "home"),
    SeedMenu {
        name: "Maintenance",
        path: "",
        icon: "settings",
        children: &[
            leaf("User", "/user", "user"),
            leaf("Role", "/role", "shield"),
            leaf("Role Menu", "/menu", "list"),
        ],
    },
    SeedMenu {
        name: "Master Setup",
        path: "",
        icon: "database",
        children: &[
            leaf("Banner", "/master/banner", "image"),
            leaf("Article", "/master/article", "file-text"),
            leaf("Contact", "/master/contact", "phone"),
        ],
    },
    SeedMenu {
        name: "Order",
        path: "",
        icon: "shopping-cart",
        children: &[leaf("Order List", "/order", "list")],
    },
];

/// 空库时写入初始数据，返回是否写入
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<bool, AppError> {
    let (roles,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM access")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to inspect seed state: {e}")))?;
    if roles > 0 {
        tracing::debug!(roles, "Database already initialized, skipping seed");
        return Ok(false);
    }

    let password_hash = hash_password(SEED_PASSWORD.to_string()).await?;
    let now = shared::util::now_millis() / 1000;
    seed(pool, &password_hash, now).await?;

    tracing::info!(
        username = SEED_USERNAME,
        role = SEED_ROLE,
        "Seeded initial menus, privileges and superuser account"
    );
    Ok(true)
}

async fn seed(pool: &SqlitePool, password_hash: &str, now: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let (access_id,): (i64,) = sqlx::query_as(
        "INSERT INTO access (name, description, is_show, status, created_at, updated_at) VALUES (?1, 'Full Access', 0, 1, ?2, ?2) RETURNING id",
    )
    .bind(SEED_ROLE)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO account (access_id, username, password, fullname, status, created_at, updated_at) VALUES (?1, ?2, ?3, 'Super User', 1, ?4, ?4)",
    )
    .bind(access_id)
    .bind(SEED_USERNAME)
    .bind(password_hash)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (root_sort, root) in MENUS.iter().enumerate() {
        let root_id = insert_menu(&mut tx, root, 0, 1, root_sort as i64 + 1, now).await?;
        if root.children.is_empty() {
            grant_menu(&mut tx, access_id, root_id, root.path, now).await?;
        }
        for (sort, child) in root.children.iter().enumerate() {
            let child_id = insert_menu(&mut tx, child, root_id, 2, sort as i64 + 1, now).await?;
            grant_menu(&mut tx, access_id, child_id, child.path, now).await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

async fn insert_menu(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    menu: &SeedMenu,
    parent_id: i64,
    level: i64,
    sort: i64,
    now: i64,
) -> RepoResult<i64> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO menu (name, path, icon, level, parent_id, sort, is_group, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8) RETURNING id",
    )
    .bind(menu.name)
    .bind(menu.path)
    .bind(menu.icon)
    .bind(level)
    .bind(parent_id)
    .bind(sort)
    .bind(!menu.children.is_empty())
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// 为页面菜单创建四种权限、对应路由规则，并授予默认角色
///
/// `view` 覆盖列表和详情路由，其余动作覆盖写接口。
async fn grant_menu(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    access_id: i64,
    menu_id: i64,
    path: &str,
    now: i64,
) -> RepoResult<()> {
    let code_base = path.trim_start_matches('/').replace('/', ".");

    for action in PrivilegeAction::ALL {
        let (privilege_id,): (i64,) = sqlx::query_as(
            "INSERT INTO privilege (menu_id, code, action) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(menu_id)
        .bind(format!("{code_base}.{}", action.as_str()))
        .bind(action)
        .fetch_one(&mut **tx)
        .await?;

        let routes: Vec<(String, &str)> = match action {
            PrivilegeAction::View => vec![
                (path.to_string(), "GET"),
                (format!("{path}/:id"), "GET"),
            ],
            PrivilegeAction::Create => vec![(format!("{path}/create"), "POST")],
            PrivilegeAction::Update => vec![(format!("{path}/:id/edit"), "PUT")],
            PrivilegeAction::Delete => vec![(format!("{path}/:id/delete"), "DELETE")],
        };
        for (route, method) in routes {
            sqlx::query("INSERT INTO route_permission (privilege_id, path, method) VALUES (?, ?, ?)")
                .bind(privilege_id)
                .bind(route)
                .bind(method)
                .execute(&mut **tx)
                .await?;
        }

        sqlx::query(
            "INSERT INTO access_permission (access_id, privilege_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(access_id)
        .bind(privilege_id)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
