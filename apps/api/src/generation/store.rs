//! Content Persistence — append-only log of generated content.
//!
//! One row per successful pipeline run: the originating request fields plus
//! the serialized content. Rows are never updated or deleted here. Writes are
//! best-effort telemetry; the pipeline logs and swallows any failure.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::generation::content::ParsedContent;
use crate::generation::request::ContentRequest;

/// The persistence trait for generated content. Carried in `AppState` as
/// `Arc<dyn ContentStore>` so pipeline tests can observe (or fail) writes.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn record(&self, request: &ContentRequest, content: &ParsedContent) -> Result<()>;
}

/// PostgreSQL-backed store writing to the `content_logs` table.
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn record(&self, request: &ContentRequest, content: &ParsedContent) -> Result<()> {
        let content_json = serde_json::to_value(content)?;

        sqlx::query(
            r#"
            INSERT INTO content_logs
                (content_type, course, topic, subtopic, description, time, knowledge_level, content)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(request.content_type.as_str())
        .bind(&request.course)
        .bind(&request.topic)
        .bind(&request.subtopic)
        .bind(&request.description)
        .bind(&request.time)
        .bind(&request.knowledge_level)
        .bind(&content_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
