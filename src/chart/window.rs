use chrono::{NaiveDateTime, TimeDelta};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, ChartResult};

/// Format of the `start_datetime` / `end_datetime` query parameters.
/// The `+` is sent literally; the backend turns it back into a space.
pub const PARAM_FORMAT: &str = "%Y-%m-%d+%H:%M:%S";

/// Formats accepted for a reference instant coming from the date-time picker.
const REFERENCE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Lookback periods offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lookback {
    #[default]
    OneHour,
    SixHours,
    OneDay,
    ThreeDays,
    OneWeek,
}

impl Lookback {
    pub const ALL: [Self; 5] = [
        Self::OneHour,
        Self::SixHours,
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
    ];

    /// Look up a lookback by its selector label. Labels are matched exactly.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OneHour => "1 hour",
            Self::SixHours => "6 hours",
            Self::OneDay => "1 day",
            Self::ThreeDays => "3 days",
            Self::OneWeek => "1 week",
        }
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        match self {
            Self::OneHour => TimeDelta::hours(1),
            Self::SixHours => TimeDelta::hours(6),
            Self::OneDay => TimeDelta::days(1),
            Self::ThreeDays => TimeDelta::days(3),
            Self::OneWeek => TimeDelta::weeks(1),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Lookback {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| ChartError::BadRequest(format!("Unknown lookback period '{s}'")))
    }
}

/// Time window requested on refresh: `[reference - lookback, reference]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QueryWindow {
    /// # Errors
    ///
    /// Returns `ChartError::BadRequest` if the start would fall outside the representable range.
    pub fn ending_at(reference: NaiveDateTime, lookback: Lookback) -> ChartResult<Self> {
        let start = reference
            .checked_sub_signed(lookback.duration())
            .ok_or_else(|| {
                ChartError::BadRequest(format!(
                    "Reference {reference} minus {lookback} is out of range"
                ))
            })?;

        Ok(Self {
            start,
            end: reference,
        })
    }

    #[must_use]
    pub fn start_param(&self) -> String {
        self.start.format(PARAM_FORMAT).to_string()
    }

    #[must_use]
    pub fn end_param(&self) -> String {
        self.end.format(PARAM_FORMAT).to_string()
    }
}

/// Parse a reference instant as submitted by the date-time picker.
///
/// # Errors
///
/// Returns `ChartError::BadRequest` if no accepted format matches.
pub fn parse_reference(input: &str) -> ChartResult<NaiveDateTime> {
    let input = input.trim();
    REFERENCE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| ChartError::BadRequest(format!("Invalid reference date-time '{input}'")))
}
