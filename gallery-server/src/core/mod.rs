//! 服务骨架: 配置、共享状态、启动错误和 HTTP 服务

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
