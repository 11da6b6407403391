//! Menu Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::permission::PrivilegeAction;

/// Menu entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: i64,
    pub name: String,
    /// Empty for pure grouping nodes
    pub path: String,
    pub icon: Option<String>,
    pub level: i64,
    /// 0 marks a root
    pub parent_id: i64,
    pub sort: i64,
    pub is_group: bool,
    pub status: i64,
}

/// Flat menu × privilege row, input of the tree builder
///
/// A menu without privileges appears once with `privilege_id = None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuRow {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub level: i64,
    pub parent_id: i64,
    pub sort: i64,
    pub is_group: bool,
    pub privilege_id: Option<i64>,
    pub action: Option<PrivilegeAction>,
}

/// Action attached to a menu node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuAction {
    pub privilege_id: i64,
    pub action: PrivilegeAction,
}

/// Node of the navigation forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub level: i64,
    pub parent_id: i64,
    pub sort: i64,
    pub is_group: bool,
    pub actions: Vec<MenuAction>,
    pub children: Vec<MenuNode>,
}

/// Update menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuUpdate {
    pub id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1))]
    pub sort: i64,
    #[validate(range(min = 0, max = 1))]
    pub status: i64,
}
