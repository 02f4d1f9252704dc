// SPDX-License-Identifier: MIT

pub mod clock;
pub mod date_math;
mod error;
pub mod offset;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date_math::{
    DEFAULT_START_TIME_LEAD_MINUTES, DateMath, date_days_from_now, date_minutes_from_now, date_months_from_now,
    exact_start_time, months_from_end_of_today, start_of_today,
};
pub use error::{Error, Result};
pub use offset::{Field, Offset};
pub use time::DateTimeUtc;
