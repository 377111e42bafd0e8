//! Genealogical dates, sort keys and spans.
//!
//! A [`Date`] may be fully specified, partial (year or year/month) or empty.
//! Its sort value is the Julian day number of the earliest day it could
//! denote, `0` when empty.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FilterError;

/// Julian day number of 0001-01-01 minus one, the offset between
/// `NaiveDate::num_days_from_ce` and a Julian day number.
const JULIAN_DAY_OFFSET: i64 = 1_721_425;

/// A possibly partial calendar date. Zero components are unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub day: u32,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn year_only(year: i32) -> Self {
        Self::new(year, 0, 0)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    pub fn is_full(&self) -> bool {
        self.year != 0 && self.month != 0 && self.day != 0
    }

    fn naive(&self) -> Option<NaiveDate> {
        if self.is_empty() {
            return None;
        }
        let month = self.month.max(1);
        NaiveDate::from_ymd_opt(self.year, month, self.day.max(1))
            .or_else(|| NaiveDate::from_ymd_opt(self.year, month, 1))
    }

    /// Sortable numeric key, `0` for an empty date.
    pub fn sortval(&self) -> i64 {
        self.naive()
            .map(|d| i64::from(d.num_days_from_ce()) + JULIAN_DAY_OFFSET)
            .unwrap_or(0)
    }

    /// Inverse of [`sortval`](Self::sortval) for a non-zero key.
    pub fn from_sortval(sortval: i64) -> Option<Self> {
        if sortval <= 0 {
            return None;
        }
        let days = i32::try_from(sortval - JULIAN_DAY_OFFSET).ok()?;
        let date = NaiveDate::from_num_days_from_ce_opt(days)?;
        Some(Self::new(date.year(), date.month(), date.day()))
    }

    /// Shift by whole years, keeping the known components.
    pub fn add_years(&self, years: i32) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::new(self.year.saturating_add(years), self.month, self.day)
    }

    /// Parse `YYYY`, `YYYY/MM` or `YYYY/MM/DD`.
    pub fn parse(text: &str) -> Result<Self, FilterError> {
        let invalid = |message: &str| FilterError::InvalidDate {
            value: text.to_string(),
            message: message.to_string(),
        };
        let mut parts = text.trim().split('/');
        let year = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| invalid("missing year"))?
            .parse::<i32>()
            .map_err(|e| invalid(&e.to_string()))?;
        let month = match parts.next() {
            Some(p) => p.parse::<u32>().map_err(|e| invalid(&e.to_string()))?,
            None => 0,
        };
        let day = match parts.next() {
            Some(p) => p.parse::<u32>().map_err(|e| invalid(&e.to_string()))?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(invalid("too many components"));
        }
        if month > 12 || day > 31 {
            return Err(invalid("month or day out of range"));
        }
        Ok(Self::new(year, month, day))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.year, self.month, self.day) {
            (0, 0, 0) => Ok(()),
            (y, 0, _) => write!(f, "{y:04}"),
            (y, m, 0) => write!(f, "{y:04}-{m:02}"),
            (y, m, d) => write!(f, "{y:04}-{m:02}-{d:02}"),
        }
    }
}

/// Optional inclusive bounds on a timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    /// Parse `YYYY/MM/DD-YYYY/MM/DD`.
    ///
    /// A side without a `/` is left unset, so `"-1950/12/31"` bounds only the
    /// end. Text without a `-` yields an unbounded range.
    pub fn parse(text: &str) -> Result<Self, FilterError> {
        let Some((start, end)) = text.split_once('-') else {
            return Ok(Self::default());
        };
        let side = |part: &str| -> Result<Option<Date>, FilterError> {
            if part.contains('/') {
                Date::parse(part).map(Some)
            } else {
                Ok(None)
            }
        };
        Ok(Self {
            start: side(start)?,
            end: side(end)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Unit words used when formatting spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub year: (String, String),
    pub month: (String, String),
    pub day: (String, String),
    pub separator: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            year: ("year".into(), "years".into()),
            month: ("month".into(), "months".into()),
            day: ("day".into(), "days".into()),
            separator: ", ".into(),
        }
    }
}

impl Locale {
    fn unit<'a>(count: u32, unit: &'a (String, String)) -> &'a str {
        if count == 1 {
            &unit.0
        } else {
            &unit.1
        }
    }
}

/// Calendar distance between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Span {
    /// Span from `start` to `end`, `None` when either date is empty or the
    /// span would be negative.
    pub fn between(start: &Date, end: &Date) -> Option<Self> {
        let from = start.naive()?;
        let to = end.naive()?;
        if to < from {
            return None;
        }
        let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
        if to.day() < from.day() {
            months -= 1;
        }
        let months = u32::try_from(months).ok()?;
        let anchor = from.checked_add_months(Months::new(months))?;
        let days = u32::try_from((to - anchor).num_days()).ok()?;
        Some(Self {
            years: months / 12,
            months: months % 12,
            days,
        })
    }

    /// Format with at most `precision` non-zero units, largest first.
    pub fn format(&self, precision: u8, locale: &Locale) -> String {
        let units = [
            (self.years, &locale.year),
            (self.months, &locale.month),
            (self.days, &locale.day),
        ];
        let parts: Vec<String> = units
            .iter()
            .filter(|(count, _)| *count > 0)
            .take(usize::from(precision.clamp(1, 3)))
            .map(|(count, unit)| format!("{count} {}", Locale::unit(*count, unit)))
            .collect();
        if parts.is_empty() {
            return format!("0 {}", locale.day.1);
        }
        parts.join(&locale.separator)
    }
}
