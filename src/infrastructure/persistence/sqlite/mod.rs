//! SQLite 持久化实现

mod chapter_repo;
mod database;
mod policy_repo;

pub use chapter_repo::SqliteChapterRepository;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use policy_repo::SqliteReleasePolicyRepository;
