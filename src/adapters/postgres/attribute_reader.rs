//! PostgreSQL implementation of AttributeReader.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::domain::foundation::{AlternativeId, CriterionCode};
use crate::domain::ranking::AttributeValue;
use crate::ports::{AttributeReader, DataSourceError};

/// Reads per-listing criterion values from `room_attributes`.
pub struct PostgresAttributeReader {
    pool: PgPool,
}

impl PostgresAttributeReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttributeRow {
    room_id: i64,
    criterion_code: String,
    value: Option<f64>,
}

#[async_trait]
impl AttributeReader for PostgresAttributeReader {
    async fn read_attributes(
        &self,
        alternatives: &[AlternativeId],
        criteria: &[CriterionCode],
    ) -> Result<Vec<AttributeValue>, DataSourceError> {
        if alternatives.is_empty() || criteria.is_empty() {
            return Ok(Vec::new());
        }

        let room_ids: Vec<i64> = alternatives.iter().map(|id| id.value()).collect();
        let codes: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();

        let rows: Vec<AttributeRow> = sqlx::query_as(
            r#"
            SELECT
                ra.room_id::int8 AS room_id,
                c.code AS criterion_code,
                ra.value::float8 AS value
            FROM room_attributes ra
            JOIN criteria c ON ra.criterion_id = c.criterion_id
            WHERE ra.room_id = ANY($1)
              AND c.code = ANY($2)
            ORDER BY ra.room_id, c.display_order
            "#,
        )
        .bind(&room_ids)
        .bind(&codes)
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Loaded room attributes");

        // NULL values are treated as missing.
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                Some(AttributeValue::new(
                    row.room_id,
                    row.criterion_code.as_str(),
                    row.value?,
                ))
            })
            .collect())
    }
}
