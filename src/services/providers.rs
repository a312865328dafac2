//! Provider management service

use crate::{
    error::AppResult,
    models::provider::{CreateProvider, Provider, UpdateProviderProfile},
    repository::Repository,
};

#[derive(Clone)]
pub struct ProvidersService {
    repository: Repository,
}

impl ProvidersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List active providers for booking flows
    pub async fn list_active(&self) -> AppResult<Vec<Provider>> {
        self.repository.providers.list_active().await
    }

    /// Create a provider (administrative action)
    pub async fn create(&self, data: &CreateProvider) -> AppResult<Provider> {
        let provider = self.repository.providers.create(data).await?;
        tracing::info!(provider_id = provider.id, "provider created");
        Ok(provider)
    }

    /// Update the profile of the provider linked to a user identity
    pub async fn update_own_profile(
        &self,
        user_id: i32,
        data: &UpdateProviderProfile,
    ) -> AppResult<Provider> {
        let provider = self.repository.providers.get_by_user_id(user_id).await?;
        self.repository.providers.update_profile(provider.id, data).await
    }

    /// Deactivate a provider (soft delete)
    pub async fn deactivate(&self, id: i32) -> AppResult<Provider> {
        let provider = self.repository.providers.deactivate(id).await?;
        tracing::info!(provider_id = id, "provider deactivated");
        Ok(provider)
    }
}
