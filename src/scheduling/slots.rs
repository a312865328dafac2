//! Slot generator
//!
//! Enumerates candidate start times within an opening window. Pure and
//! deterministic; the granularity is the atomic bookable unit.

use chrono::{Duration, NaiveTime};

/// Default slot granularity in minutes
pub const DEFAULT_GRANULARITY_MIN: u32 = 30;

/// Generate the ordered candidate start times in `[open, close)`
///
/// A slot must have its full duration before closing, so the last start
/// time is strictly less than `close`. An empty or inverted window yields
/// an empty sequence.
pub fn generate(open: NaiveTime, close: NaiveTime, granularity_minutes: u32) -> Vec<NaiveTime> {
    if granularity_minutes == 0 {
        return Vec::new();
    }
    let step = Duration::minutes(i64::from(granularity_minutes));

    let mut slots = Vec::new();
    let mut current = open;
    while current < close {
        slots.push(current);
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped > 0 {
            // Stepped past midnight
            break;
        }
        current = next;
    }
    slots
}

/// Whether `time` falls exactly on the slot grid starting at `open`
pub fn on_grid(time: NaiveTime, open: NaiveTime, granularity_minutes: u32) -> bool {
    if granularity_minutes == 0 || time < open {
        return false;
    }
    let elapsed = (time - open).num_minutes();
    elapsed >= 0 && elapsed % i64::from(granularity_minutes) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn standard_weekday_window_has_18_slots() {
        let slots = generate(t(12, 0), t(21, 0), 30);
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.first(), Some(&t(12, 0)));
        assert_eq!(slots.last(), Some(&t(20, 30)));
    }

    #[test]
    fn interval_is_half_open() {
        let slots = generate(t(10, 0), t(11, 0), 30);
        assert_eq!(slots, vec![t(10, 0), t(10, 30)]);
    }

    #[test]
    fn deterministic_and_restartable() {
        let a = generate(t(10, 0), t(20, 0), 30);
        let b = generate(t(10, 0), t(20, 0), 30);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_or_inverted_window_yields_nothing() {
        assert!(generate(t(12, 0), t(12, 0), 30).is_empty());
        assert!(generate(t(18, 0), t(12, 0), 30).is_empty());
    }

    #[test]
    fn zero_granularity_yields_nothing_and_never_matches() {
        assert!(generate(t(12, 0), t(21, 0), 0).is_empty());
        assert!(!on_grid(t(12, 0), t(12, 0), 0));
    }

    #[test]
    fn window_ending_at_midnight_terminates() {
        let slots = generate(t(23, 0), NaiveTime::from_hms_opt(23, 59, 59).unwrap(), 30);
        assert_eq!(slots, vec![t(23, 0), t(23, 30)]);
    }

    #[test]
    fn grid_alignment() {
        assert!(on_grid(t(12, 30), t(12, 0), 30));
        assert!(on_grid(t(12, 0), t(12, 0), 30));
        assert!(!on_grid(t(12, 15), t(12, 0), 30));
        assert!(!on_grid(t(11, 30), t(12, 0), 30));
    }
}
