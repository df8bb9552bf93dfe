//! Business-hours arithmetic over a local civil calendar.
//!
//! Every weekday, holiday and clock-hour check is made on the local date of
//! the instant's own timezone, so a UTC timestamp shortly after midnight UTC
//! still lands on the previous local day. None of these functions read the
//! system clock.

use crate::domain::model::{HolidaySet, WorkingHoursConfig};
use crate::utils::error::{Result, SlaError};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Weekday};
use std::fmt::Debug;

/// Upper bound on consecutive non-working days crossed by one skip.
pub const MAX_SKIP_DAYS: u32 = 3660;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

pub fn is_working_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(date)
}

pub fn is_within_business_hours<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    holidays: &HolidaySet,
    config: &WorkingHoursConfig,
) -> bool {
    let hour = instant.hour();
    is_working_day(instant.date_naive(), holidays)
        && hour >= config.start_hour
        && hour < config.end_hour
}

/// Start of the first working day strictly after `from`'s local date.
pub fn next_working_day_start<Tz: TimeZone + Debug>(
    from: &DateTime<Tz>,
    holidays: &HolidaySet,
    config: &WorkingHoursConfig,
) -> Result<DateTime<Tz>> {
    let origin = from.date_naive();
    let mut date = origin;

    for skipped in 1..=MAX_SKIP_DAYS {
        date = date.succ_opt().ok_or(SlaError::NoWorkingDay {
            from: origin,
            days: skipped,
        })?;
        if is_working_day(date, holidays) {
            return local_at_hour(&from.timezone(), date, config.start_hour);
        }
        tracing::trace!("Skipping non-working day {}", date);
    }

    Err(SlaError::NoWorkingDay {
        from: origin,
        days: MAX_SKIP_DAYS,
    })
}

/// Moves `start` onto working time without consuming any hours.
pub fn adjust_start<Tz: TimeZone + Debug>(
    start: &DateTime<Tz>,
    holidays: &HolidaySet,
    config: &WorkingHoursConfig,
) -> Result<DateTime<Tz>> {
    let date = start.date_naive();

    if !is_working_day(date, holidays) {
        return next_working_day_start(start, holidays, config);
    }

    let hour = start.hour();
    if hour < config.start_hour {
        local_at_hour(&start.timezone(), date, config.start_hour)
    } else if hour >= config.end_hour {
        next_working_day_start(start, holidays, config)
    } else {
        Ok(start.clone())
    }
}

/// Instant at which `required_hours` business hours have elapsed from `start`.
///
/// A zero duration returns `start` moved onto working time (unchanged when it
/// already is). A deadline that fills the window exactly lands on `end_hour`.
///
/// # Errors
///
/// `ConfigurationError` when the window is not `start_hour < end_hour <= 23`,
/// `InvalidDurationError` for negative or non-finite durations.
pub fn calculate_deadline<Tz: TimeZone + Debug>(
    start: &DateTime<Tz>,
    required_hours: f64,
    holidays: &HolidaySet,
    config: &WorkingHoursConfig,
) -> Result<DateTime<Tz>> {
    config.validate()?;
    if !required_hours.is_finite() || required_hours < 0.0 {
        return Err(SlaError::InvalidDurationError {
            hours: required_hours,
        });
    }

    let mut current = adjust_start(start, holidays, config)?;
    let mut remaining = required_hours;

    while remaining > 0.0 {
        if !is_working_day(current.date_naive(), holidays) {
            current = next_working_day_start(&current, holidays, config)?;
            continue;
        }

        let available = available_hours(&current, config);
        if remaining <= available {
            current = add_hours(&current, remaining)?;
            remaining = 0.0;
        } else {
            remaining -= available;
            current = next_working_day_start(&current, holidays, config)?;
        }
    }

    Ok(current)
}

/// Business hours elapsed in `[from, to)`; zero when `to <= from`.
pub fn business_hours_between<Tz: TimeZone + Debug>(
    from: &DateTime<Tz>,
    to: &DateTime<Tz>,
    holidays: &HolidaySet,
    config: &WorkingHoursConfig,
) -> Result<f64> {
    config.validate()?;
    if to <= from {
        return Ok(0.0);
    }

    let tz = from.timezone();
    let mut total = 0.0;
    let mut current = adjust_start(from, holidays, config)?;

    while current < *to {
        let day_end = local_at_hour(&tz, current.date_naive(), config.end_hour)?;
        let segment_end = if *to < day_end { to.clone() } else { day_end.clone() };

        if segment_end > current {
            let elapsed = segment_end - current.clone();
            total += elapsed.num_milliseconds() as f64 / MILLIS_PER_HOUR;
        }
        if *to <= day_end {
            break;
        }
        current = next_working_day_start(&current, holidays, config)?;
    }

    Ok(total)
}

/// Hours left in today's window, at minute resolution.
fn available_hours<Tz: TimeZone>(current: &DateTime<Tz>, config: &WorkingHoursConfig) -> f64 {
    let available = config.end_hour as f64 - current.hour() as f64 - current.minute() as f64 / 60.0;
    available.max(0.0)
}

fn add_hours<Tz: TimeZone>(instant: &DateTime<Tz>, hours: f64) -> Result<DateTime<Tz>> {
    let millis = (hours * MILLIS_PER_HOUR).round() as i64;
    instant
        .clone()
        .checked_add_signed(Duration::milliseconds(millis))
        .ok_or(SlaError::InvalidDurationError { hours })
}

/// `hour:00` on `date` in `tz`. Wall-clock times skipped by a DST jump resolve
/// to the first valid quarter hour after them.
fn local_at_hour<Tz: TimeZone + Debug>(tz: &Tz, date: NaiveDate, hour: u32) -> Result<DateTime<Tz>> {
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| SlaError::LocalTimeError {
            local: format!("{} {:02}:00", date, hour),
            timezone: format!("{:?}", tz),
        })?;
    resolve_local(tz, naive)
}

fn resolve_local<Tz: TimeZone + Debug>(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
    let mut candidate = naive;
    for _ in 0..=16 {
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return Ok(instant);
        }
        candidate += Duration::minutes(15);
    }

    Err(SlaError::LocalTimeError {
        local: naive.to_string(),
        timezone: format!("{:?}", tz),
    })
}
