//! Trimline Server - Appointment Booking System
//!
//! A Rust REST API server for slot availability and conflict-free booking.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trimline_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("trimline_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Trimline Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.booking.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Availability
        .route("/availability", get(api::availability::get_availability))
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/mine", get(api::bookings::my_bookings))
        .route("/bookings/active-on", get(api::bookings::active_on))
        .route("/bookings/:id/cancel", post(api::bookings::cancel_booking))
        .route("/bookings/:id/status", put(api::bookings::set_booking_status))
        .route(
            "/bookings/:id/cancellations",
            get(api::bookings::cancellation_history),
        )
        // Provider agenda
        .route("/agenda", get(api::bookings::agenda))
        .route("/agenda/upcoming", get(api::bookings::upcoming_agenda))
        // Providers
        .route("/providers", get(api::providers::list_providers))
        .route("/providers", post(api::providers::create_provider))
        .route("/providers/me", put(api::providers::update_my_profile))
        .route("/providers/:id", delete(api::providers::deactivate_provider))
        // Service catalog
        .route("/services", get(api::offerings::get_catalog))
        .route("/services", post(api::offerings::create_offering))
        .route("/services/:id", put(api::offerings::update_offering))
        .route("/services/:id", delete(api::offerings::delete_offering))
        // Business hours
        .route("/hours/overrides", get(api::hours::list_overrides))
        .route("/hours/overrides", put(api::hours::upsert_override))
        .route("/hours/overrides/:id", delete(api::hours::delete_override))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
