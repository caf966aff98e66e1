//! SQLite Release Policy Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{ReleasePolicyRepositoryPort, RepositoryError};
use crate::domain::scheduling::{PublishingDays, ReleasePolicy};

/// SQLite Release Policy Repository
pub struct SqliteReleasePolicyRepository {
    pool: DbPool,
}

impl SqliteReleasePolicyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PolicyRow {
    auto_release_enabled: i64,
    interval_days: i64,
    fixed_price_enabled: i64,
    fixed_price_amount: i64,
    use_publishing_days: i64,
    publishing_days: String,
    release_hour: i64,
    default_coins: i64,
    utc_offset_minutes: i64,
}

impl TryFrom<PolicyRow> for ReleasePolicy {
    type Error = RepositoryError;

    fn try_from(row: PolicyRow) -> Result<Self, Self::Error> {
        // 发布日以逗号拼接的星期名存储
        let names: Vec<&str> = row
            .publishing_days
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let publishing_days = PublishingDays::from_names(&names)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(ReleasePolicy {
            auto_release_enabled: row.auto_release_enabled != 0,
            interval_days: row.interval_days.max(0) as u32,
            fixed_price_enabled: row.fixed_price_enabled != 0,
            fixed_price_amount: row.fixed_price_amount.max(0) as u32,
            use_publishing_days: row.use_publishing_days != 0,
            publishing_days,
            release_hour: row.release_hour.max(0) as u32,
            default_coins: row.default_coins.max(0) as u32,
            utc_offset_minutes: row.utc_offset_minutes as i32,
        })
    }
}

#[async_trait]
impl ReleasePolicyRepositoryPort for SqliteReleasePolicyRepository {
    async fn find_by_novel(
        &self,
        novel_id: Uuid,
    ) -> Result<Option<ReleasePolicy>, RepositoryError> {
        let row: Option<PolicyRow> = sqlx::query_as(
            "SELECT auto_release_enabled, interval_days, fixed_price_enabled, fixed_price_amount, \
             use_publishing_days, publishing_days, release_hour, default_coins, utc_offset_minutes \
             FROM release_policies WHERE novel_id = ?",
        )
        .bind(novel_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ReleasePolicy::try_from).transpose()
    }

    async fn save(&self, novel_id: Uuid, policy: &ReleasePolicy) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO release_policies (novel_id, auto_release_enabled, interval_days,
                fixed_price_enabled, fixed_price_amount, use_publishing_days, publishing_days,
                release_hour, default_coins, utc_offset_minutes, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(novel_id) DO UPDATE SET
                auto_release_enabled = excluded.auto_release_enabled,
                interval_days = excluded.interval_days,
                fixed_price_enabled = excluded.fixed_price_enabled,
                fixed_price_amount = excluded.fixed_price_amount,
                use_publishing_days = excluded.use_publishing_days,
                publishing_days = excluded.publishing_days,
                release_hour = excluded.release_hour,
                default_coins = excluded.default_coins,
                utc_offset_minutes = excluded.utc_offset_minutes,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(novel_id.to_string())
        .bind(policy.auto_release_enabled as i64)
        .bind(policy.interval_days as i64)
        .bind(policy.fixed_price_enabled as i64)
        .bind(policy.fixed_price_amount as i64)
        .bind(policy.use_publishing_days as i64)
        .bind(policy.publishing_days.names().join(","))
        .bind(policy.release_hour as i64)
        .bind(policy.default_coins as i64)
        .bind(policy.utc_offset_minutes as i64)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
