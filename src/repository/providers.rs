//! Providers repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, MissingEntity},
    models::provider::{CreateProvider, Provider, UpdateProviderProfile},
};

#[derive(Clone)]
pub struct ProvidersRepository {
    pool: Pool<Postgres>,
}

impl ProvidersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get provider by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Provider> {
        sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(MissingEntity::Provider, format!("Provider {} not found", id)))
    }

    /// Get the provider linked to a user identity
    pub async fn get_by_user_id(&self, user_id: i32) -> AppResult<Provider> {
        sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(MissingEntity::Provider, format!("No provider linked to user {}", user_id))
            })
    }

    /// List active providers, ordered by name
    pub async fn list_active(&self) -> AppResult<Vec<Provider>> {
        let rows = sqlx::query_as::<_, Provider>(
            "SELECT * FROM providers WHERE active ORDER BY display_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a provider (administrative action)
    pub async fn create(&self, data: &CreateProvider) -> AppResult<Provider> {
        let hired_on = data
            .hired_on
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Invalid hired_on date".to_string()))
            })
            .transpose()?;

        let row = sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (user_id, display_name, bio, hired_on, active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(&data.display_name)
        .bind(&data.bio)
        .bind(hired_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a provider's public profile
    pub async fn update_profile(
        &self,
        id: i32,
        data: &UpdateProviderProfile,
    ) -> AppResult<Provider> {
        let row = sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers
            SET bio = COALESCE($2, bio),
                display_name = COALESCE($3, display_name)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.bio)
        .bind(&data.display_name)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(MissingEntity::Provider, format!("Provider {} not found", id)))
    }

    /// Deactivate a provider (soft; never hard-deleted while reservations
    /// reference it)
    pub async fn deactivate(&self, id: i32) -> AppResult<Provider> {
        sqlx::query_as::<_, Provider>(
            "UPDATE providers SET active = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(MissingEntity::Provider, format!("Provider {} not found", id)))
    }
}
