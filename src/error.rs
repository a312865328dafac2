//! Error types for Trimline server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes returned in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchReservation = 4,
    NoSuchProvider = 5,
    BadValue = 6,
    SlotTaken = 7,
    DailyLimitReached = 8,
    DataIntegrity = 9,
    StoreUnavailable = 10,
    NoSuchService = 11,
    NoSuchOverride = 12,
}

/// Which kind of record a failed lookup was after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEntity {
    Reservation,
    Provider,
    Service,
    HoursOverride,
}

impl MissingEntity {
    fn code(&self) -> ErrorCode {
        match self {
            MissingEntity::Reservation => ErrorCode::NoSuchReservation,
            MissingEntity::Provider => ErrorCode::NoSuchProvider,
            MissingEntity::Service => ErrorCode::NoSuchService,
            MissingEntity::HoursOverride => ErrorCode::NoSuchOverride,
        }
    }
}

/// Which uniqueness invariant rejected a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Another active reservation already holds this (provider, date, time)
    SlotTaken,
    /// The client already holds an active reservation on that date
    DailyLimitReached,
}

impl ConflictKind {
    pub fn message(&self) -> &'static str {
        match self {
            ConflictKind::SlotTaken => "That time slot has already been taken, pick another time",
            ConflictKind::DailyLimitReached => {
                "You already have an appointment on that date, only one per day is allowed"
            }
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {1}")]
    NotFound(MissingEntity, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Booking conflict: {}", .0.message())]
    Conflict(ConflictKind),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

/// True for transport-level store failures that the caller may retry
fn is_store_unavailable(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(entity, msg) => {
                (StatusCode::NOT_FOUND, entity.code(), msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Conflict(kind) => {
                let code = match kind {
                    ConflictKind::SlotTaken => ErrorCode::SlotTaken,
                    ConflictKind::DailyLimitReached => ErrorCode::DailyLimitReached,
                };
                (StatusCode::CONFLICT, code, kind.message().to_string())
            }
            AppError::DataIntegrity(msg) => {
                tracing::error!("Data integrity error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DataIntegrity,
                    "Data integrity error".to_string(),
                )
            }
            AppError::Database(e) if is_store_unavailable(e) => {
                tracing::error!("Store unavailable: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StoreUnavailable,
                    "Data store temporarily unavailable, retry later".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
