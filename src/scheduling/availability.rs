//! Availability projector
//!
//! Marks each candidate slot against existing bookings and the clock.
//! Pure function of its inputs; the service layer supplies the override,
//! the taken times and the current moment.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use super::hours::DayHours;
use super::slots;

/// Status of one candidate slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Taken,
    Elapsed,
}

/// One candidate slot with its projected status
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Slot {
    /// Slot start time (HH:MM)
    #[schema(value_type = String)]
    pub time: NaiveTime,
    pub status: SlotStatus,
}

/// Availability projection for one (provider, date)
///
/// `closed: true` means a calendar closure; a fully elapsed or fully taken
/// day still reports `closed: false` so callers can tell the two apart.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayAvailability {
    pub closed: bool,
    /// Closure reason, when closed by an override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[schema(value_type = Option<String>)]
    pub open: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub close: Option<NaiveTime>,
    pub slots: Vec<Slot>,
}

impl DayAvailability {
    pub fn closed_day(reason: Option<String>) -> Self {
        Self {
            closed: true,
            reason,
            open: None,
            close: None,
            slots: Vec::new(),
        }
    }
}

/// Project per-slot availability for one provider and date
///
/// Status priority per slot: elapsed (today only, at or before `now`),
/// then taken (active reservation holds the time), then available.
pub fn project(
    date: NaiveDate,
    hours: &DayHours,
    taken: &HashSet<NaiveTime>,
    granularity_minutes: u32,
    today: NaiveDate,
    now: NaiveTime,
) -> DayAvailability {
    let (open, close) = match hours {
        DayHours::Closed { reason } => return DayAvailability::closed_day(reason.clone()),
        DayHours::Open { open, close } => (*open, *close),
    };

    let slots = slots::generate(open, close, granularity_minutes)
        .into_iter()
        .map(|time| {
            let status = if date == today && time <= now {
                SlotStatus::Elapsed
            } else if taken.contains(&time) {
                SlotStatus::Taken
            } else {
                SlotStatus::Available
            };
            Slot { time, status }
        })
        .collect();

    DayAvailability {
        closed: false,
        reason: None,
        open: Some(open),
        close: Some(close),
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::hours::DayHours;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn weekday_hours() -> DayHours {
        DayHours::Open {
            open: t(12, 0),
            close: t(21, 0),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn morning_query_sees_all_18_slots_available() {
        // Open 12:00-21:00, no reservations, now 11:00 same day
        let avail = project(date(2), &weekday_hours(), &HashSet::new(), 30, date(2), t(11, 0));
        assert!(!avail.closed);
        assert_eq!(avail.open, Some(t(12, 0)));
        assert_eq!(avail.close, Some(t(21, 0)));
        assert_eq!(avail.slots.len(), 18);
        assert!(avail.slots.iter().all(|s| s.status == SlotStatus::Available));
        assert_eq!(avail.slots.first().unwrap().time, t(12, 0));
        assert_eq!(avail.slots.last().unwrap().time, t(20, 30));
    }

    #[test]
    fn slots_at_or_before_now_are_elapsed_today() {
        let avail = project(date(2), &weekday_hours(), &HashSet::new(), 30, date(2), t(13, 15));
        for slot in &avail.slots {
            if slot.time <= t(13, 0) {
                assert_eq!(slot.status, SlotStatus::Elapsed, "slot {}", slot.time);
            } else {
                assert_eq!(slot.status, SlotStatus::Available, "slot {}", slot.time);
            }
        }
    }

    #[test]
    fn clock_does_not_elapse_future_dates() {
        let avail = project(date(3), &weekday_hours(), &HashSet::new(), 30, date(2), t(23, 0));
        assert!(avail.slots.iter().all(|s| s.status == SlotStatus::Available));
    }

    #[test]
    fn reserved_time_reports_taken_others_unaffected() {
        let taken: HashSet<_> = [t(15, 0)].into_iter().collect();
        let avail = project(date(3), &weekday_hours(), &taken, 30, date(2), t(9, 0));
        for slot in &avail.slots {
            if slot.time == t(15, 0) {
                assert_eq!(slot.status, SlotStatus::Taken);
            } else {
                assert_eq!(slot.status, SlotStatus::Available);
            }
        }
    }

    #[test]
    fn elapsed_takes_priority_over_taken() {
        let taken: HashSet<_> = [t(12, 0)].into_iter().collect();
        let avail = project(date(2), &weekday_hours(), &taken, 30, date(2), t(12, 30));
        assert_eq!(avail.slots[0].status, SlotStatus::Elapsed);
    }

    #[test]
    fn closure_is_distinct_from_day_over() {
        let closed = project(
            date(2),
            &DayHours::Closed { reason: Some("Holiday".into()) },
            &HashSet::new(),
            30,
            date(2),
            t(9, 0),
        );
        assert!(closed.closed);
        assert!(closed.slots.is_empty());

        // Day fully elapsed: still reports closed: false
        let over = project(date(2), &weekday_hours(), &HashSet::new(), 30, date(2), t(22, 0));
        assert!(!over.closed);
        assert!(over.slots.iter().all(|s| s.status == SlotStatus::Elapsed));
    }
}
