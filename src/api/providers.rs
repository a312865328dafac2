//! Provider management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::provider::{CreateProvider, Provider, UpdateProviderProfile},
};

use super::{validate_request, AuthenticatedUser};

/// List active providers
#[utoipa::path(
    get,
    path = "/providers",
    tag = "providers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active providers", body = Vec<Provider>)
    )
)]
pub async fn list_providers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Provider>>> {
    let providers = state.services.providers.list_active().await?;
    Ok(Json(providers))
}

/// Create a provider (admin)
#[utoipa::path(
    post,
    path = "/providers",
    tag = "providers",
    security(("bearer_auth" = [])),
    request_body = CreateProvider,
    responses(
        (status = 201, description = "Provider created", body = Provider),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn create_provider(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateProvider>,
) -> AppResult<(StatusCode, Json<Provider>)> {
    claims.require_admin()?;
    validate_request(&request)?;

    let provider = state.services.providers.create(&request).await?;
    Ok((StatusCode::CREATED, Json(provider)))
}

/// Update the authenticated provider's own profile
#[utoipa::path(
    put,
    path = "/providers/me",
    tag = "providers",
    security(("bearer_auth" = [])),
    request_body = UpdateProviderProfile,
    responses(
        (status = 200, description = "Profile updated", body = Provider),
        (status = 403, description = "Caller is not a provider")
    )
)]
pub async fn update_my_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateProviderProfile>,
) -> AppResult<Json<Provider>> {
    claims.require_provider()?;
    validate_request(&request)?;

    let provider = state
        .services
        .providers
        .update_own_profile(claims.user_id, &request)
        .await?;
    Ok(Json(provider))
}

/// Deactivate a provider (admin, soft delete)
#[utoipa::path(
    delete,
    path = "/providers/{id}",
    tag = "providers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider deactivated", body = Provider),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn deactivate_provider(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Provider>> {
    claims.require_admin()?;
    let provider = state.services.providers.deactivate(id).await?;
    Ok(Json(provider))
}
