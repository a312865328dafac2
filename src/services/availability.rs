//! Availability query service
//!
//! Glues the read-only store queries to the pure scheduling core: resolve
//! the day's hours, enumerate the slot grid, mark each slot against the
//! provider's active reservations and the clock.

use chrono::{Local, NaiveDate};

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult, MissingEntity},
    repository::Repository,
    scheduling::{self, availability::DayAvailability},
};

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
    config: BookingConfig,
}

impl AvailabilityService {
    pub fn new(repository: Repository, config: BookingConfig) -> Self {
        Self { repository, config }
    }

    /// Project per-slot availability for (provider, date)
    pub async fn for_provider_date(
        &self,
        provider_id: i32,
        date: NaiveDate,
    ) -> AppResult<DayAvailability> {
        let provider = self.repository.providers.get_by_id(provider_id).await?;
        if !provider.active {
            return Err(AppError::NotFound(
                MissingEntity::Provider,
                format!("Provider {} not found", provider_id),
            ));
        }

        let hours_override = self.repository.hours.get_for_date(date).await?;
        let hours = scheduling::hours::resolve(date, hours_override.as_ref())?;

        let taken = self
            .repository
            .reservations
            .active_times(provider_id, date)
            .await?;

        let now = Local::now();
        Ok(scheduling::availability::project(
            date,
            &hours,
            &taken,
            self.config.slot_minutes,
            now.date_naive(),
            now.time(),
        ))
    }

    /// Parse a `YYYY-MM-DD` date parameter at the boundary
    pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))
    }
}
