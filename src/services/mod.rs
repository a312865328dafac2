//! Business logic services

pub mod availability;
pub mod bookings;
pub mod hours;
pub mod offerings;
pub mod providers;

use sqlx::{Pool, Postgres};

use crate::{config::BookingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub bookings: bookings::BookingsService,
    pub providers: providers::ProvidersService,
    pub offerings: offerings::OfferingsService,
    pub hours: hours::HoursService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, booking_config: BookingConfig) -> Self {
        Self {
            availability: availability::AvailabilityService::new(
                repository.clone(),
                booking_config.clone(),
            ),
            bookings: bookings::BookingsService::new(repository.clone(), booking_config),
            providers: providers::ProvidersService::new(repository.clone()),
            offerings: offerings::OfferingsService::new(repository.clone()),
            hours: hours::HoursService::new(repository.clone()),
            repository,
        }
    }

    /// Shared connection pool, for readiness probes
    pub fn pool(&self) -> Pool<Postgres> {
        self.repository.pool.clone()
    }
}
