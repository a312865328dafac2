//! Business-hours override endpoints (admin)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use crate::{
    error::AppResult,
    models::hours::{HoursOverride, HoursOverrideQuery, UpsertHoursOverride},
    services::availability::AvailabilityService,
};

use super::{validate_request, AuthenticatedUser};

/// List hours overrides
#[utoipa::path(
    get,
    path = "/hours/overrides",
    tag = "hours",
    security(("bearer_auth" = [])),
    params(HoursOverrideQuery),
    responses(
        (status = 200, description = "Hours overrides", body = Vec<HoursOverride>)
    )
)]
pub async fn list_overrides(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<HoursOverrideQuery>,
) -> AppResult<Json<Vec<HoursOverride>>> {
    claims.require_admin()?;
    let start = query
        .start_date
        .as_deref()
        .map(AvailabilityService::parse_date)
        .transpose()?;
    let end = query
        .end_date
        .as_deref()
        .map(AvailabilityService::parse_date)
        .transpose()?;
    let overrides = state.services.hours.list(start, end).await?;
    Ok(Json(overrides))
}

/// Create or replace the override for a date
#[utoipa::path(
    put,
    path = "/hours/overrides",
    tag = "hours",
    security(("bearer_auth" = [])),
    request_body = UpsertHoursOverride,
    responses(
        (status = 200, description = "Override saved", body = HoursOverride),
        (status = 400, description = "Invalid date or times"),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn upsert_override(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpsertHoursOverride>,
) -> AppResult<Json<HoursOverride>> {
    claims.require_admin()?;
    validate_request(&request)?;

    let saved = state.services.hours.upsert(&request).await?;
    Ok(Json(saved))
}

/// Delete an override
#[utoipa::path(
    delete,
    path = "/hours/overrides/{id}",
    tag = "hours",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Override ID")),
    responses(
        (status = 204, description = "Override deleted"),
        (status = 404, description = "Override not found")
    )
)]
pub async fn delete_override(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.hours.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
