//! Repository layer for database operations

pub mod hours;
pub mod offerings;
pub mod providers;
pub mod reservations;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub providers: providers::ProvidersRepository,
    pub offerings: offerings::OfferingsRepository,
    pub hours: hours::HoursRepository,
    pub reservations: reservations::ReservationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            providers: providers::ProvidersRepository::new(pool.clone()),
            offerings: offerings::OfferingsRepository::new(pool.clone()),
            hours: hours::HoursRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            pool,
        }
    }
}
