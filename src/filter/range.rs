//! Date-range buckets for the post filter

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FilterError;

/// How far back a post may be dated to pass the date filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "last-week")]
    LastWeek,
    #[serde(rename = "last-month")]
    LastMonth,
    #[serde(rename = "last-3-months")]
    LastThreeMonths,
    #[serde(rename = "last-year")]
    LastYear,
}

impl DateRange {
    /// Every bucket, in menu order
    pub const ALL: [DateRange; 5] = [
        DateRange::All,
        DateRange::LastWeek,
        DateRange::LastMonth,
        DateRange::LastThreeMonths,
        DateRange::LastYear,
    ];

    /// Maximum post age admitted by this bucket; `None` admits everything
    pub fn max_age(self) -> Option<Duration> {
        match self {
            DateRange::All => None,
            DateRange::LastWeek => Some(Duration::days(7)),
            DateRange::LastMonth => Some(Duration::days(30)),
            DateRange::LastThreeMonths => Some(Duration::days(90)),
            DateRange::LastYear => Some(Duration::days(365)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::LastWeek => "last-week",
            DateRange::LastMonth => "last-month",
            DateRange::LastThreeMonths => "last-3-months",
            DateRange::LastYear => "last-year",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            DateRange::All => "All time",
            DateRange::LastWeek => "Last week",
            DateRange::LastMonth => "Last month",
            DateRange::LastThreeMonths => "Last 3 months",
            DateRange::LastYear => "Last year",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| FilterError::UnknownDateRange(s.to_string()))
    }
}
