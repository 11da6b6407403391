//! 路由权限
//!
//! - [`RoutePattern`] - 路由模式编译与匹配
//! - [`PermissionCache`] - 权限描述缓存 (带 TTL)
//! - [`RouteResolver`] - 具体路径 + 角色 → 动作描述

pub mod cache;
pub mod pattern;
pub mod resolver;

pub use cache::{MemoryPermissionCache, PermissionCache, cache_key};
pub use pattern::RoutePattern;
pub use resolver::RouteResolver;
