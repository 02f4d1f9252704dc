// SPDX-License-Identifier: MIT

use std::str::FromStr;

use crate::time::{DateTimeUtc, parse_timestamp};

/// Source of the current moment.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTimeUtc;
}

/// Wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTimeUtc {
        chrono::Utc::now()
    }
}

/// Always returns the instant it was created with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(pub DateTimeUtc);

impl FixedClock {
    pub fn new(now: DateTimeUtc) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTimeUtc {
        self.0
    }
}

impl FromStr for FixedClock {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timestamp(s).map(Self)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTimeUtc {
        (**self).now()
    }
}

impl Clock for Box<dyn Clock> {
    fn now(&self) -> DateTimeUtc {
        self.as_ref().now()
    }
}
