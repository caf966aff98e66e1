//! SQLite Chapter Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    AdvancedChapterRecord, ChapterRecord, ChapterRepositoryPort, RepositoryError,
};
use crate::domain::novel::AgeRating;

/// SQLite Chapter Repository
pub struct SqliteChapterRepository {
    pool: DbPool,
}

impl SqliteChapterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const CHAPTER_COLUMNS: &str = "id, novel_id, chapter_number, part_number, title, content, \
     author_thoughts, publish_at, coins, volume_id, age_rating, created_at, updated_at";

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    novel_id: String,
    chapter_number: i64,
    part_number: Option<i64>,
    title: String,
    content: String,
    author_thoughts: Option<String>,
    publish_at: Option<String>,
    coins: i64,
    volume_id: Option<String>,
    age_rating: String,
    created_at: String,
    updated_at: String,
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(ChapterRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            novel_id: Uuid::parse_str(&row.novel_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            chapter_number: row.chapter_number as i32,
            part_number: row.part_number.map(|p| p as i32),
            title: row.title,
            content: row.content,
            author_thoughts: row.author_thoughts,
            publish_at: row.publish_at.as_deref().map(parse_rfc3339).transpose()?,
            coins: row.coins.max(0) as u32,
            volume_id: row
                .volume_id
                .as_deref()
                .map(Uuid::parse_str)
                .transpose()
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            age_rating: AgeRating::from_str(&row.age_rating).unwrap_or_default(),
            created_at: parse_rfc3339(&row.created_at)?,
            updated_at: parse_rfc3339(&row.updated_at)?,
        })
    }
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        RepositoryError::Duplicate(e.to_string())
    } else {
        RepositoryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ChapterRepositoryPort for SqliteChapterRepository {
    async fn create(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chapters (id, novel_id, chapter_number, part_number, title, content,
                author_thoughts, publish_at, coins, volume_id, age_rating, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(chapter.id.to_string())
        .bind(chapter.novel_id.to_string())
        .bind(chapter.chapter_number as i64)
        .bind(chapter.part_number.map(|p| p as i64))
        .bind(&chapter.title)
        .bind(&chapter.content)
        .bind(&chapter.author_thoughts)
        .bind(chapter.publish_at.map(|at| at.to_rfc3339()))
        .bind(chapter.coins as i64)
        .bind(chapter.volume_id.map(|id| id.to_string()))
        .bind(chapter.age_rating.as_str())
        .bind(chapter.created_at.to_rfc3339())
        .bind(chapter.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE chapters
            SET title = ?, content = ?, author_thoughts = ?, publish_at = ?,
                coins = ?, volume_id = ?, age_rating = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&chapter.title)
        .bind(&chapter.content)
        .bind(&chapter.author_thoughts)
        .bind(chapter.publish_at.map(|at| at.to_rfc3339()))
        .bind(chapter.coins as i64)
        .bind(chapter.volume_id.map(|id| id.to_string()))
        .bind(chapter.age_rating.as_str())
        .bind(chapter.updated_at.to_rfc3339())
        .bind(chapter.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(chapter.id.to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChapterRecord>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {CHAPTER_COLUMNS} FROM chapters WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn find_by_novel(&self, novel_id: Uuid) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {CHAPTER_COLUMNS} FROM chapters WHERE novel_id = ? \
             ORDER BY chapter_number, COALESCE(part_number, 0)"
        ))
        .bind(novel_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn find_by_key(
        &self,
        novel_id: Uuid,
        chapter_number: i32,
        part_number: Option<i32>,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        // 分部缺失与分部 0 等价
        let row: Option<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {CHAPTER_COLUMNS} FROM chapters \
             WHERE novel_id = ? AND chapter_number = ? AND COALESCE(part_number, 0) = ?"
        ))
        .bind(novel_id.to_string())
        .bind(chapter_number as i64)
        .bind(part_number.unwrap_or(0) as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn find_advanced(
        &self,
        novel_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdvancedChapterRecord>, RepositoryError> {
        // rfc3339 同一 UTC 偏移下字典序即时间序
        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT id, publish_at, coins FROM chapters \
             WHERE novel_id = ? AND publish_at IS NOT NULL AND publish_at > ? AND coins > 0",
        )
        .bind(novel_id.to_string())
        .bind(now.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|(id, publish_at, coins)| {
                Ok(AdvancedChapterRecord {
                    id: Uuid::parse_str(&id)
                        .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
                    publish_at: parse_rfc3339(&publish_at)?,
                    coins: coins.max(0) as u32,
                })
            })
            .collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM chapters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
