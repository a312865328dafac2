//! Business-hours models (date-specific overrides over weekly defaults)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Raw override row as stored
///
/// Legacy data carries open/close times in several textual representations
/// (`HH:MM`, `HH:MM:SS`, seconds since midnight); the repository normalizes
/// them into [`HoursOverride`] before any scheduling logic sees them.
#[derive(Debug, Clone, FromRow)]
pub struct HoursOverrideRow {
    pub id: i32,
    pub date: NaiveDate,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub closed: bool,
    pub reason: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Normalized date-specific business-hours override
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HoursOverride {
    pub id: i32,
    pub date: NaiveDate,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub closed: bool,
    pub reason: Option<String>,
}

/// Upsert override request (at most one override per date)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertHoursOverride {
    /// Override date (YYYY-MM-DD)
    pub date: String,
    /// Opening time (HH:MM), required unless closed
    pub open_time: Option<String>,
    /// Closing time (HH:MM), required unless closed
    pub close_time: Option<String>,
    #[serde(default)]
    pub closed: bool,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

/// Query parameters for listing overrides
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HoursOverrideQuery {
    /// Filter overrides from this date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Filter overrides until this date (YYYY-MM-DD)
    pub end_date: Option<String>,
}
