//! Service catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::offering::{
        CreateServiceOffering, ServiceCatalog, ServiceOffering, UpdateServiceOffering,
    },
};

use super::{validate_request, AuthenticatedUser};

/// Public service catalog grouped by category
#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    responses(
        (status = 200, description = "Service catalog", body = ServiceCatalog)
    )
)]
pub async fn get_catalog(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ServiceCatalog>> {
    let catalog = state.services.offerings.catalog().await?;
    Ok(Json(catalog))
}

/// Create a service offering (admin)
#[utoipa::path(
    post,
    path = "/services",
    tag = "services",
    security(("bearer_auth" = [])),
    request_body = CreateServiceOffering,
    responses(
        (status = 201, description = "Service created", body = ServiceOffering),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn create_offering(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateServiceOffering>,
) -> AppResult<(StatusCode, Json<ServiceOffering>)> {
    claims.require_admin()?;
    validate_request(&request)?;

    let offering = state.services.offerings.create(&request).await?;
    Ok((StatusCode::CREATED, Json(offering)))
}

/// Update a service offering (admin)
#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = "services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateServiceOffering,
    responses(
        (status = 200, description = "Service updated", body = ServiceOffering),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update_offering(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateServiceOffering>,
) -> AppResult<Json<ServiceOffering>> {
    claims.require_admin()?;
    validate_request(&request)?;

    let offering = state.services.offerings.update(id, &request).await?;
    Ok(Json(offering))
}

/// Delete a service offering (admin)
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete_offering(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.offerings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
