//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Reservation lifecycle status
///
/// `pending -> {confirmed, cancelled}`, `confirmed -> {cancelled, completed,
/// no_show}`; `cancelled`, `completed` and `no_show` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// Active reservations block slots and count against the daily cap
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed | ReservationStatus::NoShow
        )
    }

    /// Whether the lifecycle state machine allows `self -> next`
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        match (self, next) {
            (Pending, Confirmed) | (Pending, Cancelled) => true,
            (Confirmed, Cancelled) | (Confirmed, Completed) | (Confirmed, NoShow) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CancellationActor
// ---------------------------------------------------------------------------

/// Who cancelled a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "cancellation_actor", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CancellationActor {
    Client,
    Provider,
}

impl std::fmt::Display for CancellationActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CancellationActor::Client => "client",
            CancellationActor::Provider => "provider",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ServiceCategory
// ---------------------------------------------------------------------------

/// Service catalog grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Service,
    Combo,
    Extra,
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ServiceCategory::Service => "Service",
            ServiceCategory::Combo => "Combo",
            ServiceCategory::Extra => "Extra",
        };
        write!(f, "{}", label)
    }
}
