//! 工具模块
//!
//! - `error`: 持久层错误到 [`AppError`] 的映射
//! - `logger`: 日志初始化
//! - `validation`: 载荷校验和输入规范化

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
