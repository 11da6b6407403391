//! 错误码与错误类型
//!
//! Codes are grouped by thousands so the admin frontend can branch on the
//! range before looking at the exact value:
//!
//! | 范围 | 类别 |
//! |------|------|
//! | 0xxx | 通用 (validation, conflicts) |
//! | 1xxx | 认证 (credentials, tokens, sessions) |
//! | 2xxx | 权限 (routes, menus) |
//! | 6xxx | 后台管理 (menu, role, account) |
//! | 9xxx | 系统 |
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::UsernameExists, "Username budi already exists")
//!     .with_detail("username", "budi");
//! assert_eq!(ErrorBody::from(&err).code, 6202);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
