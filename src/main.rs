//! Scrivel - 连载小说章节放出与付费解锁引擎
//!
//! - Domain: manuscript/, novel/, scheduling/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use scrivel::config::{load_config, print_config};
use scrivel::infrastructure::adapters::{DisabledArchiveExpander, PlainTextConverter};
use scrivel::infrastructure::http::{AppState, HttpServer, ServerConfig};
use scrivel::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteChapterRepository,
    SqliteReleasePolicyRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},scrivel={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Scrivel - 连载小说章节放出引擎");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let chapter_repo = Arc::new(SqliteChapterRepository::new(pool.clone()));
    let policy_repo = Arc::new(SqliteReleasePolicyRepository::new(pool.clone()));

    // 创建书稿转换与压缩包展开适配器
    let converter = Arc::new(PlainTextConverter::new());
    let archive = Arc::new(DisabledArchiveExpander::new());

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(chapter_repo, policy_repo, converter, archive);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
