//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, health, hours, offerings, providers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trimline API",
        version = "0.1.0",
        description = "Appointment Booking System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::get_availability,
        // Bookings
        bookings::create_booking,
        bookings::cancel_booking,
        bookings::set_booking_status,
        bookings::cancellation_history,
        bookings::my_bookings,
        bookings::active_on,
        bookings::agenda,
        bookings::upcoming_agenda,
        // Providers
        providers::list_providers,
        providers::create_provider,
        providers::update_my_profile,
        providers::deactivate_provider,
        // Services
        offerings::get_catalog,
        offerings::create_offering,
        offerings::update_offering,
        offerings::delete_offering,
        // Hours
        hours::list_overrides,
        hours::upsert_override,
        hours::delete_override,
    ),
    components(
        schemas(
            // Availability
            crate::scheduling::availability::DayAvailability,
            crate::scheduling::availability::Slot,
            crate::scheduling::availability::SlotStatus,
            // Bookings
            crate::models::reservation::CreateReservation,
            crate::models::reservation::CancelReservation,
            crate::models::reservation::SetReservationStatus,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::AgendaEntry,
            crate::models::reservation::Cancellation,
            crate::models::enums::ReservationStatus,
            crate::models::enums::CancellationActor,
            bookings::BookingResponse,
            bookings::ActiveOnResponse,
            // Providers
            crate::models::provider::Provider,
            crate::models::provider::CreateProvider,
            crate::models::provider::UpdateProviderProfile,
            // Services
            crate::models::offering::ServiceOffering,
            crate::models::offering::CreateServiceOffering,
            crate::models::offering::UpdateServiceOffering,
            crate::models::offering::ServiceCatalog,
            crate::models::enums::ServiceCategory,
            // Hours
            crate::models::hours::HoursOverride,
            crate::models::hours::UpsertHoursOverride,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Slot availability queries"),
        (name = "bookings", description = "Reservation management"),
        (name = "providers", description = "Provider management"),
        (name = "services", description = "Service catalog"),
        (name = "hours", description = "Business hours administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
