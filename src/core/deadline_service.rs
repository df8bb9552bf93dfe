use crate::core::business_hours::calculate_deadline;
use crate::core::sla::{self, SlaStatus, DEFAULT_AT_RISK_HOURS};
use crate::domain::model::{
    BusinessCalendar, DeadlineRequest, DeadlineResponse, HolidaySet, WorkingHoursConfig,
    DEFAULT_REQUIRED_HOURS,
};
use crate::domain::ports::{HolidayProvider, WorkingHoursProvider};
use crate::utils::error::Result;
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;

/// Fetches the calendar from its providers, then runs the pure calculator.
///
/// A provider that fails is logged and replaced by the defaults: no holidays
/// and an 8:00-18:00 window.
pub struct DeadlineService<H: HolidayProvider, W: WorkingHoursProvider> {
    holidays: H,
    working_hours: W,
    timezone: Tz,
    default_hours: f64,
    at_risk_hours: f64,
}

impl<H: HolidayProvider, W: WorkingHoursProvider> DeadlineService<H, W> {
    pub fn new(holidays: H, working_hours: W, timezone: Tz) -> Self {
        Self {
            holidays,
            working_hours,
            timezone,
            default_hours: DEFAULT_REQUIRED_HOURS,
            at_risk_hours: DEFAULT_AT_RISK_HOURS,
        }
    }

    pub fn with_default_hours(mut self, hours: f64) -> Self {
        self.default_hours = hours;
        self
    }

    pub fn with_at_risk_hours(mut self, hours: f64) -> Self {
        self.at_risk_hours = hours;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub async fn load_calendar(&self) -> BusinessCalendar {
        let holidays = match self.holidays.holidays().await {
            Ok(holidays) => holidays,
            Err(e) => {
                tracing::warn!("⚠️ Holiday provider failed, using weekends only: {}", e);
                HolidaySet::default()
            }
        };

        let working_hours = match self.working_hours.working_hours().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("⚠️ Working hours provider failed, using 8:00-18:00: {}", e);
                WorkingHoursConfig::default()
            }
        };

        tracing::debug!(
            "Calendar loaded: {} holidays, window {}:00-{}:00 ({})",
            holidays.len(),
            working_hours.start_hour,
            working_hours.end_hour,
            self.timezone
        );

        BusinessCalendar {
            holidays,
            working_hours,
        }
    }

    pub async fn calculate(&self, request: &DeadlineRequest) -> Result<DeadlineResponse> {
        let calendar = self.load_calendar().await;
        self.calculate_with(&calendar, request)
    }

    /// Loads the calendar once for the whole batch. Stops at the first failing request.
    pub async fn calculate_batch(
        &self,
        requests: &[DeadlineRequest],
    ) -> Result<Vec<DeadlineResponse>> {
        let calendar = self.load_calendar().await;
        tracing::info!("Calculating {} deadlines", requests.len());

        requests
            .iter()
            .map(|request| self.calculate_with(&calendar, request))
            .collect()
    }

    pub fn calculate_with(
        &self,
        calendar: &BusinessCalendar,
        request: &DeadlineRequest,
    ) -> Result<DeadlineResponse> {
        let hours = request.hours.unwrap_or(self.default_hours);
        let start = request.start.with_timezone(&self.timezone);

        let deadline =
            calculate_deadline(&start, hours, &calendar.holidays, &calendar.working_hours)
                .map_err(|e| {
                    tracing::error!("❌ Deadline for request '{}' failed: {}", request.id, e);
                    e
                })?;

        tracing::debug!("Request {}: {} + {}h -> {}", request.id, start, hours, deadline);

        Ok(DeadlineResponse {
            id: request.id.clone(),
            start: request.start,
            hours,
            deadline: deadline.fixed_offset(),
        })
    }

    pub async fn status(
        &self,
        deadline: &DateTime<FixedOffset>,
        now: &DateTime<FixedOffset>,
    ) -> Result<SlaStatus> {
        let calendar = self.load_calendar().await;
        sla::evaluate(
            &deadline.with_timezone(&self.timezone),
            &now.with_timezone(&self.timezone),
            &calendar,
            self.at_risk_hours,
        )
    }
}
