//! Service catalog service

use crate::{
    error::AppResult,
    models::enums::ServiceCategory,
    models::offering::{
        CreateServiceOffering, ServiceCatalog, ServiceOffering, UpdateServiceOffering,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct OfferingsService {
    repository: Repository,
}

impl OfferingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Public catalog grouped by category
    pub async fn catalog(&self) -> AppResult<ServiceCatalog> {
        Ok(ServiceCatalog {
            services: self
                .repository
                .offerings
                .list_by_category(ServiceCategory::Service)
                .await?,
            combos: self
                .repository
                .offerings
                .list_by_category(ServiceCategory::Combo)
                .await?,
            extras: self
                .repository
                .offerings
                .list_by_category(ServiceCategory::Extra)
                .await?,
        })
    }

    pub async fn create(&self, data: &CreateServiceOffering) -> AppResult<ServiceOffering> {
        self.repository.offerings.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateServiceOffering) -> AppResult<ServiceOffering> {
        self.repository.offerings.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.offerings.delete(id).await
    }
}
