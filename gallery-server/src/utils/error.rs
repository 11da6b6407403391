//! 统一错误处理
//!
//! 错误类型定义在 `shared::error`，这里负责把持久层错误映射为 [`AppError`]。
//!
//! | RepoError | ErrorCode | HTTP |
//! |-----------|-----------|------|
//! | NotFound | NotFound | 404 |
//! | Duplicate | AlreadyExists | 409 |
//! | Validation | ValidationFailed | 400 |
//! | Database | DatabaseError | 500 |
//! | Business(code, _) | code | 按 code |

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Business(code, msg) => AppError::with_message(code, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_error_mapping() {
        let err: AppError = RepoError::NotFound("Menu 9 not found".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err: AppError = RepoError::Duplicate("username".into()).into();
        assert_eq!(err.http_status(), StatusCode::CONFLICT);

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError =
            RepoError::Business(ErrorCode::PrivilegeNotFound, "Privilege 3 not found".into())
                .into();
        assert_eq!(err.code, ErrorCode::PrivilegeNotFound);
        assert_eq!(err.message, "Privilege 3 not found");
    }
}
