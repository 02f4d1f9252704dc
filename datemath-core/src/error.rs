// SPDX-License-Identifier: MIT

use crate::offset::Field;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid date {input:?}: {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid timestamp {input:?}: {source}")]
    InvalidTimestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid offset {input:?} (expected e.g. 3mo, -2d, 45m)")]
    InvalidOffset { input: String },

    #[error("adding {amount} {field} is out of the representable date range")]
    OutOfRange { field: Field, amount: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
