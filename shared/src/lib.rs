//! Shared types for the gallery admin backend
//!
//! Error codes, data models and the auth DTOs exchanged with the admin
//! frontend.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
