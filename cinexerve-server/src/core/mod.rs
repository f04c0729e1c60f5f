//! 核心模块
//!
//! - [`config`] - 服务器配置
//! - [`state`] - 共享服务状态
//! - [`server`] - HTTP 服务器启动和路由装配

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
