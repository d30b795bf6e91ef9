//! PostgreSQL implementation of RecordRepository

use async_trait::async_trait;
use sqlx::PgPool;

use outpost::{OutboundError, OutboundRecord, RecordRepository, RecordStatus};

/// PostgreSQL record store over the `outbound_api_record` table.
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct OutboundRecordRow {
    id: i64,
    system: String,
    http_method: Option<String>,
    method: String,
    url: Option<String>,
    request_body: Option<String>,
    response_body: Option<String>,
    error_message: Option<String>,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<OutboundRecordRow> for OutboundRecord {
    fn from(row: OutboundRecordRow) -> Self {
        let status = row
            .status
            .parse::<RecordStatus>()
            .unwrap_or(RecordStatus::Pending);

        Self {
            id: row.id,
            system: row.system,
            http_method: row.http_method,
            method: row.method,
            url: row.url,
            request_body: row.request_body,
            response_body: row.response_body,
            error_message: row.error_message,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn create(&self, record: &OutboundRecord) -> Result<OutboundRecord, OutboundError> {
        let row = sqlx::query_as::<_, OutboundRecordRow>(
            r#"
            INSERT INTO outbound_api_record
                (system, http_method, method, url, request_body, response_body, error_message, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&record.system)
        .bind(&record.http_method)
        .bind(&record.method)
        .bind(&record.url)
        .bind(&record.request_body)
        .bind(&record.response_body)
        .bind(&record.error_message)
        .bind(record.status.as_str())
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| OutboundError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OutboundRecord>, OutboundError> {
        let row =
            sqlx::query_as::<_, OutboundRecordRow>("SELECT * FROM outbound_api_record WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| OutboundError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, record: &OutboundRecord) -> Result<(), OutboundError> {
        // Missing ids update zero rows, which is the intended no-op.
        sqlx::query(
            r#"
            UPDATE outbound_api_record
            SET http_method = $2, url = $3, response_body = $4, error_message = $5,
                status = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.http_method)
        .bind(&record.url)
        .bind(&record.response_body)
        .bind(&record.error_message)
        .bind(record.status.as_str())
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| OutboundError::Repository(e.to_string()))?;

        Ok(())
    }
}
