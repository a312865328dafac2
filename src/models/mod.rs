//! Data models for Trimline

pub mod enums;
pub mod hours;
pub mod identity;
pub mod offering;
pub mod provider;
pub mod reservation;

// Re-export commonly used types
pub use enums::{CancellationActor, ReservationStatus, ServiceCategory};
pub use hours::{HoursOverride, HoursOverrideRow};
pub use identity::{Role, UserClaims};
pub use offering::ServiceOffering;
pub use provider::Provider;
pub use reservation::{Cancellation, Reservation, ReservationDetails};
