//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewMapping, ShortMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_time: DateTime<Utc>,
    expiry_time: Option<DateTime<Utc>>,
}

impl From<MappingRow> for ShortMapping {
    fn from(row: MappingRow) -> Self {
        ShortMapping {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            created_time: row.created_time,
            expiry_time: row.expiry_time,
        }
    }
}

/// PostgreSQL repository for short mappings.
///
/// Both unique constraints (`short_code`, `original_url`) live on the
/// table, making each insert an atomic check-and-reserve.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<ShortMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO short_mappings (original_url, short_code, expiry_time)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_code, created_time, expiry_time
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_code)
        .bind(new_mapping.expiry_time)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, short_code, created_time, expiry_time
            FROM short_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, short_code, created_time, expiry_time
            FROM short_mappings
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete_expired_before(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShortMapping>, AppError> {
        // NULL expiry_time rows never match the comparison, so mappings
        // without an expiry are never deleted here.
        let rows = sqlx::query_as::<_, MappingRow>(
            r#"
            DELETE FROM short_mappings
            WHERE expiry_time <= $1
            RETURNING id, original_url, short_code, created_time, expiry_time
            "#,
        )
        .bind(now)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
