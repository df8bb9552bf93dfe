use crate::core::business_hours::business_hours_between;
use crate::domain::model::BusinessCalendar;
use crate::utils::error::{Result, SlaError};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AT_RISK_HOURS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaState {
    OnTrack,
    AtRisk,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlaStatus {
    pub state: SlaState,
    /// Business hours left until the deadline; zero once overdue.
    pub remaining_hours: f64,
}

/// Classifies a pending deadline relative to `now`.
///
/// `Overdue` once `now >= deadline`, `AtRisk` when no more than
/// `at_risk_hours` business hours remain.
pub fn evaluate<Tz: TimeZone + std::fmt::Debug>(
    deadline: &DateTime<Tz>,
    now: &DateTime<Tz>,
    calendar: &BusinessCalendar,
    at_risk_hours: f64,
) -> Result<SlaStatus> {
    if !at_risk_hours.is_finite() || at_risk_hours < 0.0 {
        return Err(SlaError::InvalidDurationError {
            hours: at_risk_hours,
        });
    }

    if now >= deadline {
        return Ok(SlaStatus {
            state: SlaState::Overdue,
            remaining_hours: 0.0,
        });
    }

    let remaining_hours =
        business_hours_between(now, deadline, &calendar.holidays, &calendar.working_hours)?;
    let state = if remaining_hours <= at_risk_hours {
        SlaState::AtRisk
    } else {
        SlaState::OnTrack
    };

    Ok(SlaStatus {
        state,
        remaining_hours,
    })
}
