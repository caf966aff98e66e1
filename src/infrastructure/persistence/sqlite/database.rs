//! SQLite Database - 数据库连接和迁移

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/scrivel.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    // 设置同步模式为 NORMAL（平衡性能和安全性）
    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 chapters 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chapters (
            id TEXT PRIMARY KEY,
            novel_id TEXT NOT NULL,
            chapter_number INTEGER NOT NULL,
            part_number INTEGER,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            author_thoughts TEXT,
            publish_at TEXT,
            coins INTEGER NOT NULL DEFAULT 0,
            volume_id TEXT,
            age_rating TEXT NOT NULL DEFAULT 'everyone',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 release_policies 表（每部小说至多一行）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS release_policies (
            novel_id TEXT PRIMARY KEY,
            auto_release_enabled INTEGER NOT NULL DEFAULT 0,
            interval_days INTEGER NOT NULL DEFAULT 7,
            fixed_price_enabled INTEGER NOT NULL DEFAULT 0,
            fixed_price_amount INTEGER NOT NULL DEFAULT 0,
            use_publishing_days INTEGER NOT NULL DEFAULT 0,
            publishing_days TEXT NOT NULL DEFAULT '',
            release_hour INTEGER NOT NULL DEFAULT 5,
            default_coins INTEGER NOT NULL DEFAULT 5,
            utc_offset_minutes INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 业务键唯一约束：草稿（负章节号）不参与
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_chapters_key
        ON chapters(novel_id, chapter_number, COALESCE(part_number, 0))
        WHERE chapter_number >= 0
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_chapters_novel_id
        ON chapters(novel_id)
        "#,
    )
    .execute(pool)
    .await?;

    // 索引: 提前章锚点查询 (publish_at 在未来且付费)
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_chapters_publish_at
        ON chapters(novel_id, publish_at)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_file_backed_db() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("test.db"));
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // 迁移可重复执行
        run_migrations(&pool).await.unwrap();
    }
}
