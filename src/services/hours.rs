//! Business-hours administration service

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::hours::{HoursOverride, UpsertHoursOverride},
    repository::Repository,
};

#[derive(Clone)]
pub struct HoursService {
    repository: Repository,
}

impl HoursService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<HoursOverride>> {
        self.repository.hours.list(start_date, end_date).await
    }

    pub async fn upsert(&self, data: &UpsertHoursOverride) -> AppResult<HoursOverride> {
        let saved = self.repository.hours.upsert(data).await?;
        tracing::info!(date = %saved.date, closed = saved.closed, "hours override saved");
        Ok(saved)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.hours.delete(id).await
    }
}
