//! Recurrence expansion: turns one recurring seed entry into the dates of its
//! future siblings.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CarbonError;

/// Horizon used when the caller gives no end date.
pub const DEFAULT_HORIZON_WEEKS: u64 = 26;
/// Nothing is ever generated more than this many days after the start.
pub const MAX_HORIZON_DAYS: u64 = 365;
/// Upper limit on generated dates, independent of the date bound.
pub const MAX_OCCURRENCES: usize = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recurrence_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
    Weekday,
}

impl RecurrenceFrequency {
    fn includes(self, start: NaiveDate, day: NaiveDate) -> bool {
        match self {
            RecurrenceFrequency::Daily => true,
            RecurrenceFrequency::Weekday => !matches!(day.weekday(), Weekday::Sat | Weekday::Sun),
            RecurrenceFrequency::Weekly => (day - start).num_days() % 7 == 0,
            // Months without the start's day-of-month are skipped, not rolled over
            RecurrenceFrequency::Monthly => day.day() == start.day(),
        }
    }
}

impl FromStr for RecurrenceFrequency {
    type Err = CarbonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "weekday" => Ok(Self::Weekday),
            other => Err(CarbonError::InvalidRecurrenceRule(format!(
                "unknown frequency '{other}', expected daily, weekday, weekly or monthly"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: RecurrenceFrequency,
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    /// Build a rule from untyped request fields.
    pub fn parse(frequency: Option<&str>, end_date: Option<NaiveDate>) -> Result<Self, CarbonError> {
        let frequency = frequency
            .ok_or_else(|| {
                CarbonError::InvalidRecurrenceRule(
                    "recurrence_frequency is required for recurring entries".into(),
                )
            })?
            .parse()?;
        Ok(Self {
            frequency,
            end_date,
        })
    }
}

/// Dates of the occurrences following `start`, in increasing order and never
/// including `start` itself. The window ends at the requested end date
/// (inclusive), defaulting to 26 weeks out, and is clamped to 365 days.
pub fn expand_recurrence(
    start: NaiveDate,
    rule: &RecurrenceRule,
) -> Result<Vec<NaiveDate>, CarbonError> {
    if let Some(end) = rule.end_date {
        if end < start {
            return Err(CarbonError::InvalidRecurrenceRule(format!(
                "end date {end} is before start date {start}"
            )));
        }
    }

    let hard_end = start
        .checked_add_days(Days::new(MAX_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX);
    let requested_end = rule.end_date.unwrap_or_else(|| {
        start
            .checked_add_days(Days::new(DEFAULT_HORIZON_WEEKS * 7))
            .unwrap_or(NaiveDate::MAX)
    });
    let end = requested_end.min(hard_end);

    let dates = start
        .iter_days()
        .skip(1)
        .take_while(|day| *day <= end)
        .filter(|day| rule.frequency.includes(start, *day))
        .take(MAX_OCCURRENCES)
        .collect();

    Ok(dates)
}
