// SPDX-License-Identifier: MIT

use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, Utc};

use crate::{Error, Field, Result};

pub type DateTimeUtc = DateTime<Utc>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const NULL_TIME: NaiveTime = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
const LAST_SECOND: NaiveTime = NaiveTime::from_hms_opt(23, 59, 59).unwrap();

pub fn midnight(date: NaiveDate) -> DateTimeUtc {
    date.and_time(NULL_TIME).and_utc()
}

pub fn clear_time(dt: &DateTimeUtc) -> DateTimeUtc {
    midnight(dt.date_naive())
}

/// 23:59:59 of the calendar date of `dt`, without a fractional second.
pub fn end_of_day(dt: &DateTimeUtc) -> DateTimeUtc {
    dt.date_naive().and_time(LAST_SECOND).and_utc()
}

/// Shifts the month field. The year carries over and a day that does not
/// exist in the target month is clamped to its last day.
pub fn add_months(dt: &DateTimeUtc, months: i64) -> Result<DateTimeUtc> {
    let out_of_range = || Error::OutOfRange {
        field: Field::Months,
        amount: months,
    };

    let n = u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range())?;
    let result = if months >= 0 {
        dt.checked_add_months(Months::new(n))
    } else {
        dt.checked_sub_months(Months::new(n))
    };

    result.ok_or_else(out_of_range)
}

pub fn add_days(dt: &DateTimeUtc, days: i64) -> Result<DateTimeUtc> {
    let n = Days::new(days.unsigned_abs());
    let result = if days >= 0 {
        dt.checked_add_days(n)
    } else {
        dt.checked_sub_days(n)
    };

    result.ok_or(Error::OutOfRange {
        field: Field::Days,
        amount: days,
    })
}

pub fn add_minutes(dt: &DateTimeUtc, minutes: i64) -> Result<DateTimeUtc> {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| dt.checked_add_signed(delta))
        .ok_or(Error::OutOfRange {
            field: Field::Minutes,
            amount: minutes,
        })
}

/// ISO-8601 in UTC with millisecond precision: `2024-03-15T10:20:00.000Z`.
pub fn to_iso_string(dt: &DateTimeUtc) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|source| Error::InvalidDate {
        input: s.to_string(),
        source,
    })
}

pub fn parse_timestamp(s: &str) -> Result<DateTimeUtc> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.to_utc())
        .map_err(|source| Error::InvalidTimestamp {
            input: s.to_string(),
            source,
        })
}
