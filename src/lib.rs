//! Trimline Appointment Booking System
//!
//! A Rust implementation of the Trimline appointment-booking server,
//! providing a REST JSON API for slot availability, conflict-free booking
//! and reservation lifecycle management.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduling;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ConflictKind};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
