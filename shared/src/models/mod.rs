//! Data models
//!
//! Shared between gallery-server and the admin frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod account;
pub mod device;
pub mod menu;
pub mod pagination;
pub mod permission;
pub mod role;

// Re-exports
pub use account::*;
pub use device::*;
pub use menu::*;
pub use pagination::*;
pub use permission::*;
pub use role::*;
