//! Elapsed-life breakdown.
//!
//! A pure function of a birth moment and "now". Every elapsed-unit field is
//! an independent floor conversion of the whole duration, so `minutes` is
//! total minutes lived, not the remainder after hours.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::RatesConfig;

/// Julian mean year length used for every year/age conversion.
pub const DAYS_PER_YEAR: f64 = 365.25;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Everything derived from one birth moment at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationBreakdown {
    pub leap_days_elapsed: u32,
    pub years_fractional: f64,
    pub months_approx: u64,
    pub days_elapsed: u64,
    pub hours_elapsed: u64,
    pub minutes_elapsed: u64,
    pub seconds_elapsed: u64,
    pub milliseconds_elapsed: u64,
    pub heartbeats_total: u64,
    pub breaths_total: u64,
    pub steps_approx: u64,
}

/// Computes [`DurationBreakdown`]s using a fixed set of rates.
#[derive(Debug, Clone, Default)]
pub struct DurationCalculator {
    rates: RatesConfig,
}

impl DurationCalculator {
    pub fn new(rates: RatesConfig) -> Self {
        Self { rates }
    }

    /// Breakdown of `birth..now`, or `None` if `now` precedes `birth`.
    pub fn compute(&self, birth: NaiveDateTime, now: NaiveDateTime) -> Option<DurationBreakdown> {
        if now < birth {
            return None;
        }
        let elapsed = now - birth;
        let total_ms = u64::try_from(elapsed.num_milliseconds()).ok()?;
        let days = u64::try_from(elapsed.num_days()).ok()?;

        let years = days as f64 / DAYS_PER_YEAR;
        let minutes = total_ms / MS_PER_MINUTE;

        Some(DurationBreakdown {
            leap_days_elapsed: count_leap_days(birth, now),
            years_fractional: years,
            months_approx: (years * 12.0).floor() as u64,
            days_elapsed: days,
            hours_elapsed: total_ms / MS_PER_HOUR,
            minutes_elapsed: minutes,
            seconds_elapsed: total_ms / MS_PER_SECOND,
            milliseconds_elapsed: total_ms,
            heartbeats_total: minutes.saturating_mul(self.rates.heartbeats_per_minute),
            breaths_total: minutes.saturating_mul(self.rates.breaths_per_minute),
            steps_approx: days.saturating_mul(self.rates.steps_per_day),
        })
    }
}

/// Breakdown with the default rates (72 bpm, 17 breaths/min, 6000 steps/day).
pub fn compute(birth: NaiveDateTime, now: NaiveDateTime) -> Option<DurationBreakdown> {
    DurationCalculator::default().compute(birth, now)
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of Feb-29 midnights inside the closed range `[start, end]`.
///
/// Scans years, not days.
pub fn count_leap_days(start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    if end < start {
        return 0;
    }
    (start.year()..=end.year())
        .filter(|&year| is_leap_year(year))
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 2, 29))
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .filter(|feb29| (start..=end).contains(feb29))
        .count() as u32
}
