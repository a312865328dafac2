//! Service catalog models (what a reservation is booked for)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ServiceCategory;

/// Service offering model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ServiceOffering {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    /// Price in cents
    pub price_cents: i32,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create service offering request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceOffering {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    #[validate(range(min = 0))]
    pub price_cents: i32,
}

/// Update service offering request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceOffering {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ServiceCategory>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i32>,
}

/// Service catalog grouped by category for public listing
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceCatalog {
    pub services: Vec<ServiceOffering>,
    pub combos: Vec<ServiceOffering>,
    pub extras: Vec<ServiceOffering>,
}
