//! Account Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub access_id: i64,
    /// Role name, joined from `access`
    pub access_name: String,
    pub username: String,
    pub fullname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create account payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountCreate {
    pub access_id: i64,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, max = 30))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub fullname: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Update account payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountUpdate {
    pub id: i64,
    pub access_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub fullname: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 1))]
    pub status: i64,
}
