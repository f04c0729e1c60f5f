use cinexerve_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境与日志 (日志先于配置，配置加载时的警告才可见)
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    cinexerve_server::init_logger_with_file(None, log_dir.as_deref());

    print_banner();
    tracing::info!("🎬 CineXerve API starting...");

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 初始化状态 (存储、种子数据、预订服务)
    let (state, processor) = ServerState::initialize(&config)?;

    // 4. 启动 HTTP 服务器 (Server::run 会 spawn 预订处理器)
    let server = Server::with_state(config, state, processor);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
