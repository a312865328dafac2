//! Business-hours overrides repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, MissingEntity},
    models::hours::{HoursOverride, HoursOverrideRow, UpsertHoursOverride},
    scheduling::hours::parse_time_of_day,
};

#[derive(Clone)]
pub struct HoursRepository {
    pool: Pool<Postgres>,
}

/// Normalize a raw override row: legacy open/close representations become
/// canonical times before any scheduling logic sees them
fn normalize(row: HoursOverrideRow) -> AppResult<HoursOverride> {
    let open_time = row.open_time.as_deref().map(parse_time_of_day).transpose()?;
    let close_time = row.close_time.as_deref().map(parse_time_of_day).transpose()?;
    Ok(HoursOverride {
        id: row.id,
        date: row.date,
        open_time,
        close_time,
        closed: row.closed,
        reason: row.reason,
    })
}

impl HoursRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the override for a specific date, if any
    pub async fn get_for_date(&self, date: NaiveDate) -> AppResult<Option<HoursOverride>> {
        let row = sqlx::query_as::<_, HoursOverrideRow>(
            "SELECT * FROM hours_overrides WHERE date = $1",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(normalize).transpose()
    }

    /// List overrides, optionally filtered by date range, newest first
    pub async fn list(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<HoursOverride>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if start_date.is_some() {
            conditions.push(format!("date >= ${}", idx));
            idx += 1;
        }
        if end_date.is_some() {
            conditions.push(format!("date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT * FROM hours_overrides {} ORDER BY date DESC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, HoursOverrideRow>(&query);
        if let Some(sd) = start_date {
            builder = builder.bind(sd);
        }
        if let Some(ed) = end_date {
            builder = builder.bind(ed);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        rows.into_iter().map(normalize).collect()
    }

    /// Upsert the override for a date (at most one override per date)
    pub async fn upsert(&self, data: &UpsertHoursOverride) -> AppResult<HoursOverride> {
        let date = NaiveDate::parse_from_str(&data.date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))?;

        let (open, close) = if data.closed {
            (None, None)
        } else {
            let open = data
                .open_time
                .as_deref()
                .ok_or_else(|| AppError::Validation("open_time required unless closed".to_string()))?;
            let close = data
                .close_time
                .as_deref()
                .ok_or_else(|| AppError::Validation("close_time required unless closed".to_string()))?;
            // Reject malformed input at the boundary; stored canonically as HH:MM
            let open = parse_time_of_day(open)
                .map_err(|_| AppError::Validation("Invalid open_time (use HH:MM)".to_string()))?;
            let close = parse_time_of_day(close)
                .map_err(|_| AppError::Validation("Invalid close_time (use HH:MM)".to_string()))?;
            if close <= open {
                return Err(AppError::Validation(
                    "close_time must be after open_time".to_string(),
                ));
            }
            (
                Some(open.format("%H:%M").to_string()),
                Some(close.format("%H:%M").to_string()),
            )
        };

        let row = sqlx::query_as::<_, HoursOverrideRow>(
            r#"
            INSERT INTO hours_overrides (date, open_time, close_time, closed, reason)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (date) DO UPDATE SET
                open_time = EXCLUDED.open_time,
                close_time = EXCLUDED.close_time,
                closed = EXCLUDED.closed,
                reason = EXCLUDED.reason
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(open)
        .bind(close)
        .bind(data.closed)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await?;

        normalize(row)
    }

    /// Delete an override
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM hours_overrides WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(MissingEntity::HoursOverride, format!("Hours override {} not found", id)));
        }
        Ok(())
    }
}
