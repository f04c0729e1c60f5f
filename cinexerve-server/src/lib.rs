//! CineXerve Server - 影院售票后端
//!
//! # 架构概述
//!
//! 本模块是 CineXerve API 的主入口，提供以下核心功能：
//!
//! - **预订核心** (`reservations`): 队列 + 单写者处理器，串行化座位售卖
//! - **内存存储** (`db`): 权威数据存储与种子数据
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! cinexerve-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希
//! ├── db/            # 内存存储、种子数据、用户文件
//! ├── reservations/  # 座位预订并发核心
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reservations;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::Database;
pub use reservations::{
    OutcomeHandle, ReservationError, ReservationProcessor, ReservationQueue, ReservationService,
    SeatStatusIndex,
};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______ _           _  __
  / ____/(_)___  ___ | |/ /___  ______   _____
 / /    / / __ \/ _ \|   / _ \/ ___/ | / / _ \
/ /___ / / / / /  __/   /  __/ /   | |/ /  __/
\____//_/_/ /_/\___/_/|_\___/_/    |___/\___/
    "#
    );
}
