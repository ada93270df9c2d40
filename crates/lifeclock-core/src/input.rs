//! Birth-moment derivation from user input.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::calculator::DAYS_PER_YEAR;
use crate::error::InputError;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Format accepted by [`from_calendar_date`].
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Birth moment for someone `age_years` old at `now`, measured in
/// 365.25-day years.
pub fn from_age_years(age_years: f64, now: NaiveDateTime) -> Result<NaiveDateTime, InputError> {
    if !age_years.is_finite() {
        return Err(InputError::NonFiniteAge);
    }
    if age_years < 0.0 {
        return Err(InputError::NegativeAge(age_years));
    }

    let ms = (age_years * DAYS_PER_YEAR * MS_PER_DAY).round();
    if ms >= i64::MAX as f64 {
        return Err(InputError::AgeOutOfRange(age_years));
    }
    TimeDelta::try_milliseconds(ms as i64)
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or(InputError::AgeOutOfRange(age_years))
}

/// Midnight at the start of a `DD-MM-YYYY` date.
pub fn from_calendar_date(text: &str) -> Result<NaiveDateTime, InputError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|source| InputError::MalformedDate {
            text: text.to_string(),
            source,
        })
}
