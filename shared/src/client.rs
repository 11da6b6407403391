//! Client-related types shared between server and admin frontend
//!
//! Request/response types of the `/api/v1/auth` endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::DeviceInfo;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub user: String,
    #[validate(length(min = 1, max = 100))]
    pub password: String,
    #[serde(default)]
    #[validate(nested)]
    pub device: DeviceInfo,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// First navigable menu path of the caller's role
    pub redirect_to: String,
}

/// Current user response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub name: String,
    pub access_name: String,
}

/// Route permission query
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PermissionQuery {
    #[validate(length(min = 1, max = 255))]
    pub path: String,
}

/// Mutation acknowledgement used by admin write endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub id: i64,
    pub message: String,
}

impl MutationResult {
    pub fn new(id: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}
