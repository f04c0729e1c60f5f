use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{Database, UserFile, seed};
use crate::reservations::{ReservationProcessor, ReservationService, SeatStatusIndex};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Arc<Database> | 内存权威数据存储 |
/// | reservations | Arc<ReservationService> | 座位预订服务 (队列 + 索引) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | user_file | Arc<UserFile> | users.json 持久化 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 内存权威数据存储
    pub db: Arc<Database>,
    /// 座位预订服务
    pub reservations: Arc<ReservationService>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 用户文件持久化
    pub user_file: Arc<UserFile>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 内存存储 + 预订服务 (处理器随后由 [`crate::core::Server`] 启动)
    /// 3. 种子数据 (影片、场次、座位、管理员账号)
    /// 4. users.json 加载/合并
    ///
    /// 返回状态和未启动的处理器；调用方负责 spawn。
    pub fn initialize(config: &Config) -> std::io::Result<(Self, ReservationProcessor)> {
        config.ensure_work_dir()?;

        let db = Arc::new(Database::new());
        let (reservations, processor) =
            ReservationService::new(db.clone(), config.reservation_buffer);

        seed::seed(&db, reservations.index());

        let user_file = Arc::new(UserFile::new(config.users_file()));
        user_file.load_into(&db);

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self {
            config: config.clone(),
            db,
            reservations,
            jwt_service,
            user_file,
        };

        Ok((state, processor))
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取座位状态索引 (乐观预检 + 座位图渲染)
    pub fn seat_index(&self) -> &SeatStatusIndex {
        self.reservations.index()
    }
}
