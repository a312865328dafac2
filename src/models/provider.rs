//! Provider (bookable staff member) models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Provider model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Provider {
    pub id: i32,
    /// Linked user identity
    pub user_id: i32,
    pub display_name: String,
    /// Short public biography
    pub bio: Option<String>,
    pub hired_on: Option<NaiveDate>,
    /// Inactive providers are excluded from booking flows
    pub active: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create provider request (administrative action)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProvider {
    pub user_id: i32,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    #[validate(length(max = 60))]
    pub bio: Option<String>,
    /// Hire date (YYYY-MM-DD)
    pub hired_on: Option<String>,
}

/// Update provider profile request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProviderProfile {
    #[validate(length(max = 60))]
    pub bio: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub display_name: Option<String>,
}
