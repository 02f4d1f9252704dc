// SPDX-License-Identifier: MIT

use chrono::{Datelike, TimeDelta};

use crate::{
    Clock, Error, Field, Offset, Result, SystemClock,
    time::{self, DateTimeUtc},
};

pub const DEFAULT_START_TIME_LEAD_MINUTES: i64 = 20;

/// Date arithmetic relative to the moment reported by a [`Clock`].
///
/// Every operation reads the clock once.
#[derive(Debug, Clone)]
pub struct DateMath<C: Clock = SystemClock> {
    clock: C,
    start_time_lead: TimeDelta,
}

impl DateMath<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl Default for DateMath<SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

impl<C: Clock> DateMath<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            start_time_lead: TimeDelta::minutes(DEFAULT_START_TIME_LEAD_MINUTES),
        }
    }

    /// How far ahead of now [`DateMath::exact_start_time`] schedules a
    /// same-day start.
    pub fn with_start_time_lead(mut self, lead: TimeDelta) -> Self {
        self.start_time_lead = lead;
        self
    }

    pub fn start_time_lead(&self) -> TimeDelta {
        self.start_time_lead
    }

    pub fn now(&self) -> DateTimeUtc {
        self.clock.now()
    }

    pub fn months_from_now(&self, months: i64) -> Result<DateTimeUtc> {
        self.from_now(Offset::months(months))
    }

    pub fn days_from_now(&self, days: i64) -> Result<DateTimeUtc> {
        self.from_now(Offset::days(days))
    }

    pub fn minutes_from_now(&self, minutes: i64) -> Result<DateTimeUtc> {
        self.from_now(Offset::minutes(minutes))
    }

    pub fn from_now(&self, offset: Offset) -> Result<DateTimeUtc> {
        let now = self.now();
        let result = apply(&now, offset)?;
        tracing::debug!(target: "datemath", %now, %offset, %result, "Offset from now");
        Ok(result)
    }

    /// Resolves the start time of something scheduled for the calendar date
    /// `starts_at` (`YYYY-MM-DD`).
    ///
    /// When the date falls on today's day-of-month the start is `now` plus the
    /// start-time lead, otherwise it is midnight of `starts_at`. Both come back
    /// as an ISO-8601 string.
    ///
    /// Known defect, kept as is: only the day-of-month is compared, not the
    /// whole date, so `2024-04-15` is taken for "today" on 2024-03-15.
    pub fn exact_start_time(&self, starts_at: &str) -> Result<String> {
        let selected = time::parse_date(starts_at)?;
        let now = self.now();

        let result = if selected.day() == now.day() {
            now.checked_add_signed(self.start_time_lead)
                .ok_or(Error::OutOfRange {
                    field: Field::Minutes,
                    amount: self.start_time_lead.num_minutes(),
                })?
        } else {
            time::midnight(selected)
        };

        let result = time::to_iso_string(&result);
        tracing::debug!(target: "datemath", %now, starts_at, %result, "Exact start time");
        Ok(result)
    }

    pub fn start_of_today(&self) -> DateTimeUtc {
        time::clear_time(&self.now())
    }

    /// 23:59:59 of today, moved by `months` on the month field.
    pub fn months_from_end_of_today(&self, months: i64) -> Result<DateTimeUtc> {
        let end_of_today = time::end_of_day(&self.now());
        let result = time::add_months(&end_of_today, months)?;
        tracing::debug!(target: "datemath", %end_of_today, months, %result, "Months from end of today");
        Ok(result)
    }
}

fn apply(dt: &DateTimeUtc, offset: Offset) -> Result<DateTimeUtc> {
    match offset.field {
        Field::Months => time::add_months(dt, offset.amount),
        Field::Days => time::add_days(dt, offset.amount),
        Field::Minutes => time::add_minutes(dt, offset.amount),
    }
}

pub fn date_months_from_now(months: i64) -> Result<DateTimeUtc> {
    DateMath::system().months_from_now(months)
}

pub fn date_days_from_now(days: i64) -> Result<DateTimeUtc> {
    DateMath::system().days_from_now(days)
}

pub fn date_minutes_from_now(minutes: i64) -> Result<DateTimeUtc> {
    DateMath::system().minutes_from_now(minutes)
}

pub fn exact_start_time(starts_at: &str) -> Result<String> {
    DateMath::system().exact_start_time(starts_at)
}

pub fn start_of_today() -> DateTimeUtc {
    DateMath::system().start_of_today()
}

pub fn months_from_end_of_today(months: i64) -> Result<DateTimeUtc> {
    DateMath::system().months_from_end_of_today(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedClock, time::parse_timestamp};
    use chrono::Timelike;

    fn dt(s: &str) -> DateTimeUtc {
        parse_timestamp(s).unwrap()
    }

    fn math_at(now: &str) -> DateMath<FixedClock> {
        DateMath::new(FixedClock::new(dt(now)))
    }

    #[test]
    fn zero_offset_is_identity() {
        let m = math_at("2024-03-15T10:00:00.250Z");
        let now = m.now();
        assert_eq!(m.months_from_now(0).unwrap(), now);
        assert_eq!(m.days_from_now(0).unwrap(), now);
        assert_eq!(m.minutes_from_now(0).unwrap(), now);
    }

    #[test]
    fn test_from_now() {
        struct Case<'a> {
            name: &'a str,
            now: &'a str,
            offset: Offset,
            result: &'a str,
        }
        let cases: &[Case] = &[
            Case {
                name: "two months",
                now: "2024-03-15T10:00:00Z",
                offset: Offset::months(2),
                result: "2024-05-15T10:00:00Z",
            },
            Case {
                name: "twelve months",
                now: "2024-03-15T10:00:00Z",
                offset: Offset::months(12),
                result: "2025-03-15T10:00:00Z",
            },
            Case {
                name: "month end clamp",
                now: "2023-01-31T06:00:00Z",
                offset: Offset::months(1),
                result: "2023-02-28T06:00:00Z",
            },
            Case {
                name: "negative months",
                now: "2024-01-15T10:00:00Z",
                offset: Offset::months(-1),
                result: "2023-12-15T10:00:00Z",
            },
            Case {
                name: "days over month end",
                now: "2024-03-30T10:00:00Z",
                offset: Offset::days(3),
                result: "2024-04-02T10:00:00Z",
            },
            Case {
                name: "negative days",
                now: "2024-03-01T10:00:00Z",
                offset: Offset::days(-1),
                result: "2024-02-29T10:00:00Z",
            },
            Case {
                name: "minutes over midnight",
                now: "2024-03-15T23:45:00Z",
                offset: Offset::minutes(30),
                result: "2024-03-16T00:15:00Z",
            },
            Case {
                name: "negative minutes",
                now: "2024-03-15T00:10:00Z",
                offset: Offset::minutes(-20),
                result: "2024-03-14T23:50:00Z",
            },
        ];

        for c in cases {
            let result = math_at(c.now).from_now(c.offset).unwrap();
            assert_eq!(result, dt(c.result), "Test '{}' was failed", c.name);
        }
    }

    #[test]
    fn named_offsets_match_from_now() {
        let m = math_at("2024-03-15T10:00:00Z");
        assert_eq!(m.months_from_now(5).unwrap(), m.from_now(Offset::months(5)).unwrap());
        assert_eq!(m.days_from_now(5).unwrap(), m.from_now(Offset::days(5)).unwrap());
        assert_eq!(m.minutes_from_now(5).unwrap(), m.from_now(Offset::minutes(5)).unwrap());
    }

    #[test]
    fn days_from_now_composes_with_fixed_clock() {
        let m = math_at("2024-03-15T10:00:00Z");
        let once = m.days_from_now(40).unwrap();
        let twice = math_at("2024-03-15T10:00:00Z")
            .days_from_now(15)
            .and_then(|d| time::add_days(&d, 25))
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn overflow_is_reported() {
        let m = math_at("2024-03-15T10:00:00Z");
        assert_eq!(
            m.months_from_now(i64::MAX),
            Err(Error::OutOfRange {
                field: Field::Months,
                amount: i64::MAX
            })
        );
        assert!(m.days_from_now(i64::MIN).is_err());
        assert!(m.minutes_from_now(i64::MAX).is_err());
        assert!(m.months_from_end_of_today(i64::MIN).is_err());
    }

    #[test]
    fn start_of_today_has_no_time() {
        let m = math_at("2024-03-15T10:11:12.131Z");
        let s = m.start_of_today();
        assert_eq!((s.hour(), s.minute(), s.second(), s.nanosecond()), (0, 0, 0, 0));
        assert_eq!(s.date_naive(), m.now().date_naive());
    }

    #[test]
    fn end_of_today_without_months() {
        let m = math_at("2024-03-15T10:11:12.131Z");
        let e = m.months_from_end_of_today(0).unwrap();
        assert_eq!(e, dt("2024-03-15T23:59:59Z"));
        assert_eq!(e.date_naive(), m.now().date_naive());
    }

    #[test]
    fn end_of_today_with_months() {
        assert_eq!(
            math_at("2024-03-15T00:00:00Z").months_from_end_of_today(3).unwrap(),
            dt("2024-06-15T23:59:59Z")
        );
        assert_eq!(
            math_at("2024-08-31T12:00:00Z").months_from_end_of_today(-6).unwrap(),
            dt("2024-02-29T23:59:59Z")
        );
    }

    #[test]
    fn exact_start_time_today() {
        let m = math_at("2024-03-15T10:00:00Z");
        assert_eq!(m.exact_start_time("2024-03-15").unwrap(), "2024-03-15T10:20:00.000Z");
    }

    #[test]
    fn exact_start_time_other_day() {
        let m = math_at("2024-03-15T10:00:00Z");
        assert_eq!(m.exact_start_time("2024-04-20").unwrap(), "2024-04-20T00:00:00.000Z");
        assert_eq!(m.exact_start_time("2024-03-14").unwrap(), "2024-03-14T00:00:00.000Z");
    }

    #[test]
    fn exact_start_time_same_day_of_other_month_counts_as_today() {
        let m = math_at("2024-03-15T10:00:00Z");
        assert_eq!(m.exact_start_time("2024-04-15").unwrap(), "2024-03-15T10:20:00.000Z");
        assert_eq!(m.exact_start_time("2023-01-15").unwrap(), "2024-03-15T10:20:00.000Z");
    }

    #[test]
    fn exact_start_time_custom_lead() {
        let m = math_at("2024-03-15T23:50:00Z").with_start_time_lead(TimeDelta::minutes(45));
        assert_eq!(m.start_time_lead(), TimeDelta::minutes(45));
        assert_eq!(m.exact_start_time("2024-03-15").unwrap(), "2024-03-16T00:35:00.000Z");
    }

    #[test]
    fn exact_start_time_invalid_date() {
        let m = math_at("2024-03-15T10:00:00Z");
        for input in ["", "15/03/2024", "2024-13-01", "not a date"] {
            let err = m.exact_start_time(input).unwrap_err();
            assert!(matches!(err, Error::InvalidDate { .. }), "Test '{input}' was failed");
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn system_helpers_answer() {
        let before = chrono::Utc::now();
        assert!(date_minutes_from_now(0).unwrap() >= before);
        assert!(date_days_from_now(1).unwrap() > before);
        assert!(date_months_from_now(-1).unwrap() < before);
        assert!(start_of_today() <= before);
        assert!(months_from_end_of_today(0).is_ok());
        assert!(exact_start_time("2024-03-15").is_ok());
    }
}
