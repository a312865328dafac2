//! Service catalog repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, MissingEntity},
    models::enums::ServiceCategory,
    models::offering::{CreateServiceOffering, ServiceOffering, UpdateServiceOffering},
};

#[derive(Clone)]
pub struct OfferingsRepository {
    pool: Pool<Postgres>,
}

impl OfferingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List offerings in one category, ordered by name
    pub async fn list_by_category(
        &self,
        category: ServiceCategory,
    ) -> AppResult<Vec<ServiceOffering>> {
        let rows = sqlx::query_as::<_, ServiceOffering>(
            "SELECT * FROM service_offerings WHERE category = $1 ORDER BY name",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// How many of the given ids exist
    pub async fn count_existing(&self, ids: &[i32]) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM service_offerings WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Create an offering
    pub async fn create(&self, data: &CreateServiceOffering) -> AppResult<ServiceOffering> {
        let row = sqlx::query_as::<_, ServiceOffering>(
            r#"
            INSERT INTO service_offerings (name, description, category, price_cents)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.category)
        .bind(data.price_cents)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an offering
    pub async fn update(&self, id: i32, data: &UpdateServiceOffering) -> AppResult<ServiceOffering> {
        let row = sqlx::query_as::<_, ServiceOffering>(
            r#"
            UPDATE service_offerings
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                price_cents = COALESCE($5, price_cents)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.category)
        .bind(data.price_cents)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(MissingEntity::Service, format!("Service {} not found", id)))
    }

    /// Delete an offering
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM service_offerings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(MissingEntity::Service, format!("Service {} not found", id)));
        }
        Ok(())
    }
}
