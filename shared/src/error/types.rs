//! `AppError` and the JSON error body

use std::collections::HashMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::codes::ErrorCode;

/// 后台统一错误
///
/// `details` carries field-level context (validation messages, the
/// offending path or name) and is sent to the client as-is.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ---- 认证 ----

    /// Missing bearer token, or the account behind a token is gone
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Unknown username and wrong password share this error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Fingerprint missing, malformed or superseded by a newer login
    pub fn session_expired() -> Self {
        Self::new(ErrorCode::SessionExpired)
    }

    // ---- 权限 ----

    pub fn route_forbidden(path: impl Into<String>) -> Self {
        Self::new(ErrorCode::RouteForbidden).with_detail("path", path.into())
    }

    pub fn no_accessible_menu() -> Self {
        Self::new(ErrorCode::NoAccessibleMenu)
    }

    // ---- 通用 ----

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Every failing field becomes a `details` entry holding its messages
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        errors
            .field_errors()
            .into_iter()
            .fold(AppError::validation("Validation failed"), |err, (field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(m) => m.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                err.with_detail(field.to_string(), messages)
            })
    }
}

/// Body of every failed request: `{code, message, details?}`
///
/// Successful handlers answer with their payload directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == super::category::ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "Request failed with system error");
        }
        (self.http_status(), axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_default_message_and_details() {
        let err = AppError::invalid_credentials();
        assert_eq!(err.message, "Username or password is incorrect");
        assert!(err.details.is_none());

        let err = AppError::with_message(ErrorCode::RoleNameExists, "Role Editor already exists")
            .with_detail("name", "Editor");
        assert_eq!(err.to_string(), "Role Editor already exists");
        assert_eq!(err.details.unwrap()["name"], "Editor");
    }

    #[test]
    fn test_auth_and_permission_statuses() {
        assert_eq!(AppError::invalid_credentials().http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::session_expired().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::no_accessible_menu().http_status(), StatusCode::FORBIDDEN);

        let err = AppError::route_forbidden("/master/banner");
        assert_eq!(err.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(err.details.unwrap()["path"], "/master/banner");
    }

    #[derive(Validate)]
    struct RoleName {
        #[validate(length(min = 3, message = "name too short"))]
        name: String,
    }

    #[test]
    fn test_validation_errors_become_details() {
        let err: AppError = RoleName {
            name: "ab".to_string(),
        }
        .validate()
        .unwrap_err()
        .into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap()["name"][0], "name too short");
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::with_message(ErrorCode::RoleNotFound, "Role 9 not found");
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": 6101, "message": "Role 9 not found" })
        );
    }
}
