//! Business-hours resolver
//!
//! Computes the effective opening window for a calendar date: a
//! date-specific override always wins over the weekly default table.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::{
    error::{AppError, AppResult},
    models::hours::HoursOverride,
};

/// Effective business hours for one calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayHours {
    Closed { reason: Option<String> },
    Open { open: NaiveTime, close: NaiveTime },
}

impl DayHours {
    pub fn is_closed(&self) -> bool {
        matches!(self, DayHours::Closed { .. })
    }
}

/// Weekly default opening window (policy constants, not derived)
pub fn default_hours(weekday: Weekday) -> (NaiveTime, NaiveTime) {
    let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    match weekday {
        Weekday::Sat => (t(10, 0), t(20, 0)),
        Weekday::Sun => (t(12, 0), t(18, 0)),
        _ => (t(12, 0), t(21, 0)),
    }
}

/// Resolve the effective hours for `date`, given its override if any
pub fn resolve(date: NaiveDate, hours_override: Option<&HoursOverride>) -> AppResult<DayHours> {
    if let Some(ov) = hours_override {
        if ov.closed {
            return Ok(DayHours::Closed {
                reason: ov.reason.clone(),
            });
        }
        let (open, close) = match (ov.open_time, ov.close_time) {
            (Some(open), Some(close)) => (open, close),
            _ => {
                return Err(AppError::DataIntegrity(format!(
                    "Hours override for {} is open but missing open/close times",
                    date
                )))
            }
        };
        return Ok(DayHours::Open { open, close });
    }

    let (open, close) = default_hours(date.weekday());
    Ok(DayHours::Open { open, close })
}

/// Normalize a stored time-of-day value into a canonical [`NaiveTime`]
///
/// Accepts `HH:MM`, `HH:MM:SS`, and plain seconds-since-midnight. Malformed
/// values are a data-integrity error, never guessed.
pub fn parse_time_of_day(raw: &str) -> AppResult<NaiveTime> {
    let raw = raw.trim();

    if let Ok(t) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return Ok(t);
    }
    if let Ok(t) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Ok(t);
    }
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        let seconds: u32 = raw
            .parse()
            .map_err(|_| AppError::DataIntegrity(format!("Invalid time value '{}'", raw)))?;
        if let Some(t) = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0) {
            return Ok(t);
        }
    }

    Err(AppError::DataIntegrity(format!(
        "Unrecognized time-of-day representation '{}'",
        raw
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn weekly_defaults_match_policy_table() {
        // 2025-06-02 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        for offset in 0..7 {
            let date = monday + chrono::Duration::days(offset);
            let resolved = resolve(date, None).unwrap();
            let expected = match date.weekday() {
                Weekday::Sat => (t(10, 0), t(20, 0)),
                Weekday::Sun => (t(12, 0), t(18, 0)),
                _ => (t(12, 0), t(21, 0)),
            };
            assert_eq!(
                resolved,
                DayHours::Open {
                    open: expected.0,
                    close: expected.1
                },
                "wrong hours for {}",
                date.weekday()
            );
        }
    }

    #[test]
    fn closed_override_wins_over_default() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(); // Saturday
        let ov = HoursOverride {
            id: 1,
            date,
            open_time: None,
            close_time: None,
            closed: true,
            reason: Some("Holiday".to_string()),
        };
        let resolved = resolve(date, Some(&ov)).unwrap();
        assert!(resolved.is_closed());
    }

    #[test]
    fn open_override_supplies_its_own_window() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let ov = HoursOverride {
            id: 1,
            date,
            open_time: Some(t(9, 0)),
            close_time: Some(t(14, 0)),
            closed: false,
            reason: None,
        };
        assert_eq!(
            resolve(date, Some(&ov)).unwrap(),
            DayHours::Open {
                open: t(9, 0),
                close: t(14, 0)
            }
        );
    }

    #[test]
    fn open_override_without_times_is_data_integrity_error() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let ov = HoursOverride {
            id: 1,
            date,
            open_time: Some(t(9, 0)),
            close_time: None,
            closed: false,
            reason: None,
        };
        assert!(matches!(
            resolve(date, Some(&ov)),
            Err(AppError::DataIntegrity(_))
        ));
    }

    #[test]
    fn normalizes_all_stored_time_representations() {
        assert_eq!(parse_time_of_day("10:30").unwrap(), t(10, 30));
        assert_eq!(parse_time_of_day("10:30:00").unwrap(), t(10, 30));
        // 10:30 as seconds since midnight
        assert_eq!(parse_time_of_day("37800").unwrap(), t(10, 30));
        assert_eq!(parse_time_of_day(" 08:00 ").unwrap(), t(8, 0));
    }

    #[test]
    fn malformed_time_is_rejected() {
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("soon").is_err());
        assert!(parse_time_of_day("").is_err());
        assert!(parse_time_of_day("99999999").is_err());
    }
}
