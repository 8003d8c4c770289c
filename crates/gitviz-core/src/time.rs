use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Author timestamp as recorded in a commit header: epoch seconds plus the
/// author's zone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTime {
    pub seconds: i64,
    pub offset_minutes: i32,
}

impl AuthorTime {
    pub fn new(seconds: i64, offset_minutes: i32) -> Self {
        Self {
            seconds,
            offset_minutes,
        }
    }

    /// Author-local wall clock expressed on the UTC axis: `UTC(seconds) + offset`.
    pub fn date(&self) -> Result<DateTime<Utc>, CoreError> {
        let out_of_range = || CoreError::TimestampOutOfRange {
            seconds: self.seconds,
            offset_minutes: self.offset_minutes,
        };
        let base = DateTime::from_timestamp(self.seconds, 0).ok_or_else(out_of_range)?;
        let offset = TimeDelta::try_minutes(self.offset_minutes as i64).ok_or_else(out_of_range)?;
        base.checked_add_signed(offset).ok_or_else(out_of_range)
    }

    /// Inverse of [`AuthorTime::date`].
    pub fn from_date(date: DateTime<Utc>, offset_minutes: i32) -> Self {
        Self {
            seconds: date.timestamp() - offset_minutes as i64 * 60,
            offset_minutes,
        }
    }
}
