//! Logging Infrastructure
//!
//! tracing 初始化。过滤级别优先取 `RUST_LOG`，其次是显式传入的级别；
//! 配置了日志目录时额外写入按天滚动的文件。

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with terminal output only
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger, optionally writing to a daily-rolling file
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(dir) = log_dir {
        if !Path::new(dir).exists()
            && let Err(e) = std::fs::create_dir_all(dir)
        {
            eprintln!("Failed to create log directory {}: {}", dir, e);
            subscriber.init();
            return;
        }
        let file_appender = tracing_appender::rolling::daily(dir, "cinexerve-server.log");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
