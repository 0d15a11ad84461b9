use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// TimestampError
///

#[derive(Debug, ThisError)]
pub enum TimestampError {
    #[error("invalid timestamp text: {0}")]
    Parse(#[from] time::error::Parse),

    #[error("timestamp out of the representable nanosecond range")]
    OutOfRange,
}

///
/// Timestamp
///
/// Nanoseconds since the Unix epoch, signed.
/// The single date/time scalar carried by rows and statement parameters;
/// rendered as RFC 3339 where a textual form is needed.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const UNIX_EPOCH: Self = Self(0);

    #[must_use]
    pub const fn from_unix_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[must_use]
    pub const fn unix_nanos(self) -> i64 {
        self.0
    }

    pub fn parse_rfc3339(text: &str) -> Result<Self, TimestampError> {
        let parsed = OffsetDateTime::parse(text, &Rfc3339)?;
        let nanos =
            i64::try_from(parsed.unix_timestamp_nanos()).map_err(|_| TimestampError::OutOfRange)?;

        Ok(Self(nanos))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0))
            .ok()
            .and_then(|dt| dt.format(&Rfc3339).ok());

        match rendered {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}ns", self.0),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(nanos: i64) -> Self {
        Self(nanos)
    }
}

///
/// TESTS
///
