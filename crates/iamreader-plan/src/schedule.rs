//! Publication schedule resolution.
//!
//! A record's `dt_pub` is either an absolute timestamp, passed through untouched, or a
//! relative value `+<N>d <time>` meaning "N days after the latest scheduled publication,
//! at `time`". The time may carry a UTC offset (`12:30:00+00:00`) or be naive.

use std::str::FromStr;

use chrono::{Days, FixedOffset, NaiveDate, NaiveTime};

use crate::PlanError;

/// Output format of a resolved date and time, without the offset.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A parsed relative `dt_pub` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeSchedule {
    /// Days after the latest publication date.
    pub days: u64,
    /// Time of day.
    pub time: NaiveTime,
    /// UTC offset of `time`, if given.
    pub offset: Option<FixedOffset>,
}

impl RelativeSchedule {
    /// Returns true if `value` uses the relative form.
    pub fn is_relative(value: &str) -> bool {
        value.starts_with('+')
    }

    /// Resolves against the latest publication date.
    ///
    /// Returns the formatted timestamp and the new latest date.
    pub fn resolve(&self, latest: NaiveDate) -> Result<(String, NaiveDate), PlanError> {
        let date = latest
            .checked_add_days(Days::new(self.days))
            .ok_or_else(|| PlanError::InvalidSchedule {
                value: format!("+{}d", self.days),
                reason: "date out of range",
            })?;
        let stamp = date.and_time(self.time).format(DATETIME_FORMAT);
        let rendered = match self.offset {
            Some(offset) => format!("{stamp}{offset}"),
            None => stamp.to_string(),
        };
        Ok((rendered, date))
    }
}

impl FromStr for RelativeSchedule {
    type Err = PlanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| PlanError::InvalidSchedule {
            value: value.to_string(),
            reason,
        };

        let (shift, time) = value
            .split_once(' ')
            .ok_or_else(|| invalid("expected '+<days>d <time>'"))?;
        let days = shift
            .strip_prefix('+')
            .and_then(|s| s.strip_suffix('d'))
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| invalid("day shift must look like '+1d'"))?;

        let time = time.trim();
        let (clock, offset) = match time.find(['+', '-', 'Z']) {
            Some(idx) => (&time[..idx], Some(&time[idx..])),
            None => (time, None),
        };
        let time = parse_clock(clock).ok_or_else(|| invalid("time must be HH:MM[:SS]"))?;
        let offset = offset
            .map(|o| parse_offset(o).ok_or_else(|| invalid("offset must be Z or ±HH:MM")))
            .transpose()?;

        Ok(Self { days, time, offset })
    }
}

/// Parses `HH:MM:SS` or `HH:MM`.
fn parse_clock(clock: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(clock, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .ok()
}

/// Parses `Z`, `±HH:MM` or `±HHMM`.
fn parse_offset(offset: &str) -> Option<FixedOffset> {
    if offset == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match offset.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Extracts the calendar date from a published `dt_pub` value.
///
/// Every timestamp this crate writes, and any ISO 8601 timestamp, starts with `YYYY-MM-DD`.
pub fn published_date(value: &str) -> Result<NaiveDate, PlanError> {
    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .ok_or_else(|| PlanError::InvalidPublishedDate {
            value: value.to_string(),
        })
}
