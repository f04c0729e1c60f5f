//! 数据层
//!
//! 内存权威存储 (无持久化，进程即数据库)：
//!
//! - [`store`] - `Database`：每个实体一张 RwLock 表 + 原子 ID 分配
//! - [`seed`] - 启动种子数据 (影片目录、场次、座位、管理员账号)
//! - [`user_file`] - users.json 加载/持久化 (唯一落盘的数据)
//!
//! 预订路径上 `Database` 只能由预订处理器写入；参见 [`crate::reservations`]。

pub mod seed;
pub mod store;
pub mod user_file;

pub use store::Database;
pub use user_file::UserFile;
