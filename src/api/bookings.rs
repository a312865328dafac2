//! Booking endpoints (create, cancel, status changes, listings)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::enums::ReservationStatus,
    models::reservation::{
        AgendaEntry, CancelReservation, Cancellation, CreateReservation, ReservationDetails,
        SetReservationStatus,
    },
    services::availability::AvailabilityService,
};

use super::{validate_request, AuthenticatedUser};

/// Booking response
#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    /// Reservation ID
    pub reservation_id: Uuid,
    pub status: ReservationStatus,
    /// Status message
    pub message: String,
}

/// Query parameters for the daily-cap pre-check
#[derive(Debug, Deserialize, IntoParams)]
pub struct ActiveOnQuery {
    /// Date to check (YYYY-MM-DD)
    pub date: String,
}

/// Daily-cap pre-check response
#[derive(Serialize, ToSchema)]
pub struct ActiveOnResponse {
    pub has_reservation: bool,
}

/// Query parameters for the provider agenda
#[derive(Debug, Deserialize, IntoParams)]
pub struct AgendaQuery {
    /// Agenda date (YYYY-MM-DD)
    pub date: String,
}

/// Book a slot
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = BookingResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Slot taken or daily limit reached")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    validate_request(&request)?;

    let reservation = state.services.bookings.book(&claims, &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            reservation_id: reservation.id,
            status: reservation.status,
            message: "Reservation booked successfully".to_string(),
        }),
    ))
}

/// Cancel a reservation (client or assigned provider)
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Reservation ID")),
    request_body = CancelReservation,
    responses(
        (status = 200, description = "Reservation cancelled", body = BookingResponse),
        (status = 403, description = "Not the owner or assigned provider"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelReservation>,
) -> AppResult<Json<BookingResponse>> {
    validate_request(&request)?;

    let reservation = state.services.bookings.cancel(&claims, id, &request).await?;

    Ok(Json(BookingResponse {
        reservation_id: reservation.id,
        status: reservation.status,
        message: "Reservation cancelled".to_string(),
    }))
}

/// Provider status change (confirm or cancel with reason)
#[utoipa::path(
    put,
    path = "/bookings/{id}/status",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Reservation ID")),
    request_body = SetReservationStatus,
    responses(
        (status = 200, description = "Status updated", body = BookingResponse),
        (status = 400, description = "Invalid transition or missing reason"),
        (status = 403, description = "Reservation not assigned to this provider")
    )
)]
pub async fn set_booking_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SetReservationStatus>,
) -> AppResult<Json<BookingResponse>> {
    validate_request(&request)?;

    let reservation = state
        .services
        .bookings
        .set_status(&claims, id, &request)
        .await?;

    Ok(Json(BookingResponse {
        reservation_id: reservation.id,
        status: reservation.status,
        message: format!("Reservation is now {}", reservation.status),
    }))
}

/// The authenticated client's reservations
#[utoipa::path(
    get,
    path = "/bookings/mine",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Client's reservations", body = Vec<ReservationDetails>)
    )
)]
pub async fn my_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state.services.bookings.my_reservations(&claims).await?;
    Ok(Json(reservations))
}

/// Cancellation audit records for a reservation
#[utoipa::path(
    get,
    path = "/bookings/{id}/cancellations",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Cancellation records", body = Vec<Cancellation>),
        (status = 403, description = "Not the owner or assigned provider"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancellation_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Cancellation>>> {
    let records = state
        .services
        .bookings
        .cancellation_history(&claims, id)
        .await?;
    Ok(Json(records))
}

/// Whether the client already holds an active reservation on a date
#[utoipa::path(
    get,
    path = "/bookings/active-on",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(ActiveOnQuery),
    responses(
        (status = 200, description = "Daily-cap pre-check", body = ActiveOnResponse)
    )
)]
pub async fn active_on(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActiveOnQuery>,
) -> AppResult<Json<ActiveOnResponse>> {
    let date = AvailabilityService::parse_date(&query.date)?;
    let has_reservation = state.services.bookings.has_active_on(&claims, date).await?;
    Ok(Json(ActiveOnResponse { has_reservation }))
}

/// The authenticated provider's agenda for one date
#[utoipa::path(
    get,
    path = "/agenda",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(AgendaQuery),
    responses(
        (status = 200, description = "Provider agenda", body = Vec<AgendaEntry>),
        (status = 403, description = "Caller is not a provider")
    )
)]
pub async fn agenda(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AgendaQuery>,
) -> AppResult<Json<Vec<AgendaEntry>>> {
    let date = AvailabilityService::parse_date(&query.date)?;
    let entries = state.services.bookings.agenda_for_date(&claims, date).await?;
    Ok(Json(entries))
}

/// The authenticated provider's future agenda
#[utoipa::path(
    get,
    path = "/agenda/upcoming",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Future reservations", body = Vec<AgendaEntry>),
        (status = 403, description = "Caller is not a provider")
    )
)]
pub async fn upcoming_agenda(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AgendaEntry>>> {
    let entries = state.services.bookings.future_agenda(&claims).await?;
    Ok(Json(entries))
}
