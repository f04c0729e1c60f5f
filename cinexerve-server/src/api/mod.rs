//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录/个人资料接口
//! - [`movies`] - 影片管理接口
//! - [`showtimes`] - 场次管理接口
//! - [`seats`] - 座位图接口
//! - [`bookings`] - 预订/取消/历史接口 (挂载在根路径)

pub mod auth;
pub mod bookings;
pub mod health;
pub mod movies;
pub mod seats;
pub mod showtimes;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
