//! Reservation and cancellation models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{CancellationActor, ReservationStatus};

/// Reservation model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    /// Owning client identity
    pub client_id: i32,
    pub provider_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: ReservationStatus,
    pub crea_date: DateTime<Utc>,
}

/// Reservation with display details (provider, selected services)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReservationDetails {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: ReservationStatus,
    pub provider_id: i32,
    pub provider_name: String,
    /// Selected service names, comma separated
    pub services: Option<String>,
}

/// A provider's view of one reservation on their agenda
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AgendaEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: ReservationStatus,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub services: Option<String>,
}

/// Book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    pub provider_id: i32,
    /// Appointment date (YYYY-MM-DD)
    pub date: String,
    /// Slot start time (HH:MM)
    pub start_time: String,
    /// Selected service ids, at least one
    #[validate(length(min = 1))]
    pub service_ids: Vec<i32>,
}

/// Cancel request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CancelReservation {
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
}

/// Provider status-change request (confirmed or cancelled only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetReservationStatus {
    pub status: ReservationStatus,
    /// Required when status is cancelled
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

/// Cancellation audit record, append-only
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Cancellation {
    pub id: i32,
    pub reservation_id: Uuid,
    pub reason: String,
    pub actor: CancellationActor,
    pub crea_date: DateTime<Utc>,
}
