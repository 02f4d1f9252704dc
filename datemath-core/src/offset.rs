// SPDX-License-Identifier: MIT

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Calendar field an offset is applied to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Months,
    Days,
    Minutes,
}

impl Field {
    fn unit(&self) -> &'static str {
        match self {
            Field::Months => "mo",
            Field::Days => "d",
            Field::Minutes => "m",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Months => write!(f, "months"),
            Field::Days => write!(f, "days"),
            Field::Minutes => write!(f, "minutes"),
        }
    }
}

/// A signed amount added to one calendar field.
///
/// The text form is `<amount><unit>` with units `mo`, `d` and `m` (or `min`),
/// e.g. `3mo`, `-2d`, `45m`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub field: Field,
    pub amount: i64,
}

impl Offset {
    pub fn months(amount: i64) -> Self {
        Self {
            field: Field::Months,
            amount,
        }
    }

    pub fn days(amount: i64) -> Self {
        Self {
            field: Field::Days,
            amount,
        }
    }

    pub fn minutes(amount: i64) -> Self {
        Self {
            field: Field::Minutes,
            amount,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.field.unit())
    }
}

impl FromStr for Offset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidOffset { input: s.to_string() };

        let trimmed = s.trim();
        let unit_start = trimmed
            .char_indices()
            .find(|(i, c)| c.is_ascii_alphabetic() && *i > 0)
            .map(|(i, _)| i)
            .ok_or_else(invalid)?;
        let (amount, unit) = trimmed.split_at(unit_start);

        let amount = amount.parse::<i64>().map_err(|_| invalid())?;
        let field = match unit.to_ascii_lowercase().as_str() {
            "mo" => Field::Months,
            "d" => Field::Days,
            "m" | "min" => Field::Minutes,
            _ => return Err(invalid()),
        };

        Ok(Self { field, amount })
    }
}
