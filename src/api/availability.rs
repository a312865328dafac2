//! Availability query endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    scheduling::availability::DayAvailability,
    services::availability::AvailabilityService,
};

use super::AuthenticatedUser;

/// Query parameters for an availability lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Provider to query
    pub provider_id: i32,
    /// Date to query (YYYY-MM-DD)
    pub date: String,
}

/// Per-slot availability for a provider and date
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Per-slot availability", body = DayAvailability),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Provider not found or inactive")
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<DayAvailability>> {
    let date = AvailabilityService::parse_date(&query.date)?;
    let availability = state
        .services
        .availability
        .for_provider_date(query.provider_id, date)
        .await?;
    Ok(Json(availability))
}
