use crate::domain::model::{HolidaySet, WorkingHoursConfig};
use crate::domain::ports::{HolidayProvider, WorkingHoursProvider};
use crate::utils::error::Result;
use async_trait::async_trait;

/// In-memory calendar, typically built from the TOML or environment configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendarProvider {
    holidays: HolidaySet,
    working_hours: WorkingHoursConfig,
}

impl StaticCalendarProvider {
    pub fn new(holidays: HolidaySet, working_hours: WorkingHoursConfig) -> Self {
        Self {
            holidays,
            working_hours,
        }
    }
}

#[async_trait]
impl HolidayProvider for StaticCalendarProvider {
    async fn holidays(&self) -> Result<HolidaySet> {
        Ok(self.holidays.clone())
    }
}

#[async_trait]
impl WorkingHoursProvider for StaticCalendarProvider {
    async fn working_hours(&self) -> Result<WorkingHoursConfig> {
        Ok(self.working_hours)
    }
}
