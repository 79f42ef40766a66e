//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::domain::repositories::ClickRepository;
use crate::error::{AppError, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    short_code_ref: String,
    user_location: String,
    country: String,
    platform: String,
    click_count: i32,
    created_time: DateTime<Utc>,
}

impl From<ClickRow> for ClickEvent {
    fn from(row: ClickRow) -> Self {
        ClickEvent {
            id: row.id,
            short_code_ref: row.short_code_ref,
            user_location: row.user_location,
            country: row.country,
            platform: row.platform,
            click_count: row.click_count,
            created_time: row.created_time,
        }
    }
}

/// PostgreSQL repository for click events.
///
/// `short_code_ref` carries no foreign key, so inserts succeed even after
/// the referenced mapping has been deleted; [`Self::delete_orphaned`] is
/// the reconciliation for those rows.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO click_events (short_code_ref, user_location, country, platform)
            VALUES ($1, $2, $3, $4)
            RETURNING id, short_code_ref, user_location, country, platform,
                      click_count, created_time
            "#,
        )
        .bind(&new_click.short_code_ref)
        .bind(&new_click.user_location)
        .bind(&new_click.country)
        .bind(&new_click.platform)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_by_code(&self, code: &str) -> Result<Vec<ClickEvent>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, short_code_ref, user_location, country, platform,
                   click_count, created_time
            FROM click_events
            WHERE short_code_ref = $1
            ORDER BY created_time ASC, id ASC
            "#,
        )
        .bind(code)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_by_codes(&self, codes: &[String]) -> Result<u64, AppError> {
        if codes.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            DELETE FROM click_events
            WHERE short_code_ref = ANY($1)
            "#,
        )
        .bind(codes)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_orphaned(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM click_events c
            WHERE NOT EXISTS (
                SELECT 1 FROM short_mappings m
                WHERE m.short_code = c.short_code_ref
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
