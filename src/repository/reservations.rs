//! Reservations repository: the booking transaction manager's writes
//!
//! Sole writer of reservation status transitions and cancellation records.
//! All coordination between concurrent booking attempts is pushed to the
//! store: the conditional insert enforces the per-client-per-day cap and
//! the `uniq_provider_slot` partial unique index arbitrates slot races.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ConflictKind, MissingEntity},
    models::enums::{CancellationActor, ReservationStatus},
    models::reservation::{AgendaEntry, Cancellation, Reservation, ReservationDetails},
};

/// Names of the uniqueness constraints that arbitrate booking races
const UNIQ_PROVIDER_SLOT: &str = "uniq_provider_slot";
const UNIQ_CLIENT_DAY: &str = "uniq_client_day";

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

/// Translate a constraint violation into the conflict kind that fired
fn map_booking_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        match db.constraint() {
            Some(UNIQ_PROVIDER_SLOT) => return AppError::Conflict(ConflictKind::SlotTaken),
            Some(UNIQ_CLIENT_DAY) => return AppError::Conflict(ConflictKind::DailyLimitReached),
            _ => {}
        }
    }
    e.into()
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(MissingEntity::Reservation, format!("Reservation {} not found", id))
            })
    }

    /// Start times held by active reservations for (provider, date)
    pub async fn active_times(
        &self,
        provider_id: i32,
        date: NaiveDate,
    ) -> AppResult<HashSet<NaiveTime>> {
        let times: Vec<NaiveTime> = sqlx::query_scalar(
            r#"
            SELECT start_time FROM reservations
            WHERE provider_id = $1 AND date = $2
              AND status IN ('pending', 'confirmed')
            "#,
        )
        .bind(provider_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(times.into_iter().collect())
    }

    /// Whether the client already holds an active reservation on a date
    pub async fn client_has_active_on(&self, client_id: i32, date: NaiveDate) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE client_id = $1 AND date = $2
                  AND status IN ('pending', 'confirmed')
            )
            "#,
        )
        .bind(client_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a reservation with its service associations, atomically
    ///
    /// One transaction: a conditional insert that only succeeds when the
    /// client holds no active reservation that day, then the service rows.
    /// Zero rows inserted means the daily cap fired; a violation of
    /// `uniq_provider_slot` means another request took the slot first. Any
    /// failure rolls the whole booking back, so a reservation never exists
    /// without at least one service association.
    pub async fn create(
        &self,
        client_id: i32,
        provider_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
        service_ids: &[i32],
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (id, client_id, provider_id, date, start_time, status)
            SELECT $1, $2, $3, $4, $5, 'pending'
            WHERE NOT EXISTS (
                SELECT 1 FROM reservations
                WHERE client_id = $2 AND date = $4
                  AND status IN ('pending', 'confirmed')
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id)
        .bind(provider_id)
        .bind(date)
        .bind(start_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_booking_error)?;

        let Some(reservation) = inserted else {
            tx.rollback().await?;
            return Err(AppError::Conflict(ConflictKind::DailyLimitReached));
        };

        for service_id in service_ids {
            sqlx::query(
                "INSERT INTO reservation_services (reservation_id, service_id) VALUES ($1, $2)",
            )
            .bind(reservation.id)
            .bind(service_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(reservation)
    }

    /// Cancel a reservation and append its audit record, atomically
    ///
    /// The status update is conditional on the reservation still being
    /// active, so concurrent cancellations produce exactly one record.
    pub async fn cancel(
        &self,
        id: Uuid,
        actor: CancellationActor,
        reason: &str,
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET status = 'cancelled'
            WHERE id = $1 AND status IN ('pending', 'confirmed')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(reservation) = updated else {
            tx.rollback().await?;
            return Err(AppError::Validation(
                "Reservation is no longer active and cannot be cancelled".to_string(),
            ));
        };

        sqlx::query("INSERT INTO cancellations (reservation_id, reason, actor) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(reason)
            .bind(actor)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    /// Confirm a pending reservation
    pub async fn confirm(&self, id: Uuid) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET status = 'confirmed'
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::Validation("Only pending reservations can be confirmed".to_string())
        })
    }

    /// A client's reservations with provider and service details
    ///
    /// Ordered active-first (confirmed, pending) then by date/time desc.
    pub async fn list_for_client(&self, client_id: i32) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query_as::<_, ReservationDetails>(
            r#"
            SELECT r.id, r.date, r.start_time, r.status,
                   p.id AS provider_id, p.display_name AS provider_name,
                   string_agg(s.name, ', ' ORDER BY s.name) AS services
            FROM reservations r
            JOIN providers p ON r.provider_id = p.id
            LEFT JOIN reservation_services rs ON rs.reservation_id = r.id
            LEFT JOIN service_offerings s ON s.id = rs.service_id
            WHERE r.client_id = $1
            GROUP BY r.id, p.id
            ORDER BY CASE r.status
                         WHEN 'confirmed' THEN 0
                         WHEN 'pending' THEN 1
                         WHEN 'completed' THEN 2
                         ELSE 3
                     END,
                     r.date DESC, r.start_time DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// A provider's reservations for one date, with client contact details
    pub async fn agenda_for_date(
        &self,
        provider_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<AgendaEntry>> {
        let rows = sqlx::query_as::<_, AgendaEntry>(
            r#"
            SELECT r.id, r.date, r.start_time, r.status,
                   u.name AS client_name, u.email AS client_email, u.phone AS client_phone,
                   string_agg(s.name, ', ' ORDER BY s.name) AS services
            FROM reservations r
            JOIN users u ON r.client_id = u.id
            LEFT JOIN reservation_services rs ON rs.reservation_id = r.id
            LEFT JOIN service_offerings s ON s.id = rs.service_id
            WHERE r.provider_id = $1 AND r.date = $2
            GROUP BY r.id, u.id
            ORDER BY r.start_time
            "#,
        )
        .bind(provider_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// A provider's reservations strictly after a date
    pub async fn agenda_after(
        &self,
        provider_id: i32,
        after: NaiveDate,
    ) -> AppResult<Vec<AgendaEntry>> {
        let rows = sqlx::query_as::<_, AgendaEntry>(
            r#"
            SELECT r.id, r.date, r.start_time, r.status,
                   u.name AS client_name, u.email AS client_email, u.phone AS client_phone,
                   string_agg(s.name, ', ' ORDER BY s.name) AS services
            FROM reservations r
            JOIN users u ON r.client_id = u.id
            LEFT JOIN reservation_services rs ON rs.reservation_id = r.id
            LEFT JOIN service_offerings s ON s.id = rs.service_id
            WHERE r.provider_id = $1 AND r.date > $2
            GROUP BY r.id, u.id
            ORDER BY r.date, r.start_time
            "#,
        )
        .bind(provider_id)
        .bind(after)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Cancellation records for a reservation (append-only audit trail)
    pub async fn cancellations_for(&self, reservation_id: Uuid) -> AppResult<Vec<Cancellation>> {
        let rows = sqlx::query_as::<_, Cancellation>(
            "SELECT * FROM cancellations WHERE reservation_id = $1 ORDER BY crea_date",
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
