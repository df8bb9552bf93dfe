use crate::utils::error::{Result, SlaError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 18;
pub const DEFAULT_REQUIRED_HOURS: f64 = 4.0;
pub const DEFAULT_TIMEZONE: &str = "America/Bogota";

/// Daily working window `[start_hour, end_hour)` in local clock hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursConfig {
    #[serde(alias = "startHour")]
    pub start_hour: u32,
    #[serde(alias = "endHour")]
    pub end_hour: u32,
}

impl WorkingHoursConfig {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        let config = Self {
            start_hour,
            end_hour,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_hour >= self.end_hour || self.end_hour > 23 {
            return Err(SlaError::ConfigurationError {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        Ok(())
    }

    pub fn hours_per_day(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }
}

impl Default for WorkingHoursConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

/// Non-working calendar dates on top of weekends.
///
/// Fixed dates match exactly; recurring entries match the same month and day
/// in every year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
    recurring: BTreeSet<(u32, u32)>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `YYYY-MM-DD` strings.
    pub fn parse<I, S>(dates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for raw in dates {
            set.insert(parse_date(raw.as_ref())?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn insert_recurring(&mut self, month: u32, day: u32) -> Result<()> {
        // 2000 是閏年，允許 02-29
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(SlaError::InvalidConfigValueError {
                field: "holidays.recurring".to_string(),
                value: format!("{:02}-{:02}", month, day),
                reason: "Not a valid month/day".to_string(),
            });
        }
        self.recurring.insert((month, day));
        Ok(())
    }

    /// Parses a recurring entry written as `MM-DD`.
    pub fn insert_recurring_str(&mut self, raw: &str) -> Result<()> {
        let invalid = || SlaError::InvalidConfigValueError {
            field: "holidays.recurring".to_string(),
            value: raw.to_string(),
            reason: "Expected MM-DD".to_string(),
        };
        let (month, day) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;
        self.insert_recurring(month, day)
    }

    pub fn extend(&mut self, other: &HolidaySet) {
        self.dates.extend(other.dates.iter().copied());
        self.recurring.extend(other.recurring.iter().copied());
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.dates.contains(&date) || self.recurring.contains(&(date.month(), date.day()))
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len() + self.recurring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.recurring.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
            recurring: BTreeSet::new(),
        }
    }
}

/// Holidays and working window used together by every calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessCalendar {
    pub holidays: HolidaySet,
    pub working_hours: WorkingHoursConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineRequest {
    pub id: String,
    pub start: DateTime<FixedOffset>,
    #[serde(default)]
    pub hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineResponse {
    pub id: String,
    pub start: DateTime<FixedOffset>,
    pub hours: f64,
    pub deadline: DateTime<FixedOffset>,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?)
}

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM[:SS]` read as
/// local time in `tz`.
pub fn parse_instant<Tz: TimeZone + std::fmt::Debug>(raw: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(tz));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| SlaError::LocalTimeError {
            local: naive.to_string(),
            timezone: format!("{:?}", tz),
        })
}
