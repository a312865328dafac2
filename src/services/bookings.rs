//! Booking transaction manager
//!
//! Validates booking requests at the boundary, then delegates the atomic
//! check-and-insert / status-change writes to the reservations repository.
//! Identity is passed in explicitly as request-scoped claims.

use std::collections::HashSet;

use chrono::{Local, NaiveDate, NaiveTime};

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        enums::{CancellationActor, ReservationStatus},
        identity::{Role, UserClaims},
        reservation::{
            AgendaEntry, CancelReservation, CreateReservation, Reservation, ReservationDetails,
            SetReservationStatus,
        },
    },
    repository::Repository,
    scheduling::{self, DayHours},
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    config: BookingConfig,
}

impl BookingsService {
    pub fn new(repository: Repository, config: BookingConfig) -> Self {
        Self { repository, config }
    }

    /// Book a slot for the authenticated client
    pub async fn book(
        &self,
        claims: &UserClaims,
        request: &CreateReservation,
    ) -> AppResult<Reservation> {
        let date = parse_date(&request.date)?;
        let start_time = parse_slot_time(&request.start_time)?;

        let provider = self.repository.providers.get_by_id(request.provider_id).await?;
        if !provider.active {
            return Err(AppError::Validation(
                "This provider is not taking bookings".to_string(),
            ));
        }

        // Deduplicate and verify the selected services exist
        let service_ids: Vec<i32> = {
            let unique: HashSet<i32> = request.service_ids.iter().copied().collect();
            let mut ids: Vec<i32> = unique.into_iter().collect();
            ids.sort_unstable();
            ids
        };
        if service_ids.is_empty() {
            return Err(AppError::Validation(
                "At least one service must be selected".to_string(),
            ));
        }
        let existing = self.repository.offerings.count_existing(&service_ids).await?;
        if existing != service_ids.len() as i64 {
            return Err(AppError::Validation(
                "One or more selected services do not exist".to_string(),
            ));
        }

        // The requested slot must lie on the grid of an open day and must
        // not already have elapsed
        let now = Local::now();
        let today = now.date_naive();
        if date < today {
            return Err(AppError::Validation(
                "Cannot book a date in the past".to_string(),
            ));
        }

        let hours_override = self.repository.hours.get_for_date(date).await?;
        match scheduling::hours::resolve(date, hours_override.as_ref())? {
            DayHours::Closed { .. } => {
                return Err(AppError::Validation(
                    "The business is closed on that date".to_string(),
                ))
            }
            DayHours::Open { open, close } => {
                if start_time < open
                    || start_time >= close
                    || !scheduling::slots::on_grid(start_time, open, self.config.slot_minutes)
                {
                    return Err(AppError::Validation(
                        "Requested time is not a bookable slot".to_string(),
                    ));
                }
            }
        }
        if date == today && start_time <= now.time() {
            return Err(AppError::Validation(
                "Requested slot has already passed".to_string(),
            ));
        }

        let reservation = self
            .repository
            .reservations
            .create(claims.user_id, provider.id, date, start_time, &service_ids)
            .await?;

        tracing::info!(
            reservation_id = %reservation.id,
            client_id = claims.user_id,
            provider_id = provider.id,
            %date,
            %start_time,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Cancel a reservation on behalf of its owner or assigned provider
    pub async fn cancel(
        &self,
        claims: &UserClaims,
        id: uuid::Uuid,
        request: &CancelReservation,
    ) -> AppResult<Reservation> {
        let reservation = self.repository.reservations.get_by_id(id).await?;

        let actor = match claims.role {
            Role::Client => {
                if reservation.client_id != claims.user_id {
                    return Err(AppError::Authorization(
                        "You do not own this reservation".to_string(),
                    ));
                }
                CancellationActor::Client
            }
            Role::Provider => {
                let provider = self
                    .repository
                    .providers
                    .get_by_user_id(claims.user_id)
                    .await?;
                if reservation.provider_id != provider.id {
                    return Err(AppError::Authorization(
                        "Reservation is not assigned to you".to_string(),
                    ));
                }
                CancellationActor::Provider
            }
            Role::Admin => {
                return Err(AppError::Authorization(
                    "Only the client or the assigned provider may cancel".to_string(),
                ))
            }
        };

        if !reservation.status.can_transition_to(ReservationStatus::Cancelled) {
            return Err(AppError::Validation(format!(
                "Cannot cancel a {} reservation",
                reservation.status
            )));
        }

        let cancelled = self
            .repository
            .reservations
            .cancel(id, actor, request.reason.trim())
            .await?;

        tracing::info!(reservation_id = %id, %actor, "reservation cancelled");
        Ok(cancelled)
    }

    /// Provider-driven status change (confirm or cancel)
    pub async fn set_status(
        &self,
        claims: &UserClaims,
        id: uuid::Uuid,
        request: &SetReservationStatus,
    ) -> AppResult<Reservation> {
        claims.require_provider()?;
        let provider = self
            .repository
            .providers
            .get_by_user_id(claims.user_id)
            .await?;

        let reservation = self.repository.reservations.get_by_id(id).await?;
        if reservation.provider_id != provider.id {
            return Err(AppError::Authorization(
                "Reservation is not assigned to you".to_string(),
            ));
        }

        match request.status {
            ReservationStatus::Confirmed => {
                if !reservation.status.can_transition_to(ReservationStatus::Confirmed) {
                    return Err(AppError::Validation(format!(
                        "Cannot confirm a {} reservation",
                        reservation.status
                    )));
                }
                let confirmed = self.repository.reservations.confirm(id).await?;
                tracing::info!(reservation_id = %id, "reservation confirmed");
                Ok(confirmed)
            }
            ReservationStatus::Cancelled => {
                let reason = request
                    .reason
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation("A cancellation reason is required".to_string())
                    })?;
                if !reservation.status.can_transition_to(ReservationStatus::Cancelled) {
                    return Err(AppError::Validation(format!(
                        "Cannot cancel a {} reservation",
                        reservation.status
                    )));
                }
                let cancelled = self
                    .repository
                    .reservations
                    .cancel(id, CancellationActor::Provider, reason)
                    .await?;
                tracing::info!(reservation_id = %id, "reservation cancelled by provider");
                Ok(cancelled)
            }
            other => Err(AppError::Validation(format!(
                "Providers may only set confirmed or cancelled, not {}",
                other
            ))),
        }
    }

    /// The authenticated client's reservations
    pub async fn my_reservations(&self, claims: &UserClaims) -> AppResult<Vec<ReservationDetails>> {
        let reservations = self
            .repository
            .reservations
            .list_for_client(claims.user_id)
            .await?;
        // A reservation without a single service association must never occur
        for r in &reservations {
            if r.services.is_none() {
                tracing::error!(reservation_id = %r.id, "reservation has no service associations");
            }
        }
        Ok(reservations)
    }

    /// Cancellation audit records for a reservation
    ///
    /// Visible to the owning client and the assigned provider only.
    pub async fn cancellation_history(
        &self,
        claims: &UserClaims,
        id: uuid::Uuid,
    ) -> AppResult<Vec<crate::models::reservation::Cancellation>> {
        let reservation = self.repository.reservations.get_by_id(id).await?;
        match claims.role {
            Role::Client if reservation.client_id == claims.user_id => {}
            Role::Provider => {
                let provider = self
                    .repository
                    .providers
                    .get_by_user_id(claims.user_id)
                    .await?;
                if reservation.provider_id != provider.id {
                    return Err(AppError::Authorization(
                        "Reservation is not assigned to you".to_string(),
                    ));
                }
            }
            Role::Admin => {}
            _ => {
                return Err(AppError::Authorization(
                    "You do not own this reservation".to_string(),
                ))
            }
        }
        self.repository.reservations.cancellations_for(id).await
    }

    /// Whether the client already has an active reservation on a date
    pub async fn has_active_on(&self, claims: &UserClaims, date: NaiveDate) -> AppResult<bool> {
        self.repository
            .reservations
            .client_has_active_on(claims.user_id, date)
            .await
    }

    /// The authenticated provider's agenda for one date
    pub async fn agenda_for_date(
        &self,
        claims: &UserClaims,
        date: NaiveDate,
    ) -> AppResult<Vec<AgendaEntry>> {
        claims.require_provider()?;
        let provider = self
            .repository
            .providers
            .get_by_user_id(claims.user_id)
            .await?;
        self.repository
            .reservations
            .agenda_for_date(provider.id, date)
            .await
    }

    /// The authenticated provider's future agenda (tomorrow onward)
    pub async fn future_agenda(&self, claims: &UserClaims) -> AppResult<Vec<AgendaEntry>> {
        claims.require_provider()?;
        let provider = self
            .repository
            .providers
            .get_by_user_id(claims.user_id)
            .await?;
        self.repository
            .reservations
            .agenda_after(provider.id, Local::now().date_naive())
            .await
    }
}

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))
}

fn parse_slot_time(raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid start_time (use HH:MM)".to_string()))
}
