//! Pure scheduling core: hours resolution, slot generation, availability
//! projection. No I/O; the repository and services feed it data.

pub mod availability;
pub mod hours;
pub mod slots;

pub use availability::{DayAvailability, Slot, SlotStatus};
pub use hours::DayHours;
