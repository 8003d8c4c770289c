use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive upper bound on commit dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateFilter {
    cutoff: DateTime<Utc>,
}

impl DateFilter {
    /// Keep every commit dated on or before `day` (the whole day, UTC).
    pub fn on_or_before(day: NaiveDate) -> Result<Self, CoreError> {
        let last_second = day
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| CoreError::InvalidDateFilter {
                input: day.to_string(),
            })?;
        Ok(Self {
            cutoff: last_second.and_utc(),
        })
    }

    pub fn at(cutoff: DateTime<Utc>) -> Self {
        Self { cutoff }
    }

    pub fn admits(&self, date: &DateTime<Utc>) -> bool {
        *date <= self.cutoff
    }
}

impl FromStr for DateFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
            CoreError::InvalidDateFilter {
                input: s.to_string(),
            }
        })?;
        Self::on_or_before(day)
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<= {}", self.cutoff.format("%Y-%m-%d %H:%M:%S"))
    }
}
