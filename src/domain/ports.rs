use crate::domain::model::{HolidaySet, WorkingHoursConfig};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of non-working dates, usually backed by a database or HTTP endpoint.
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    async fn holidays(&self) -> Result<HolidaySet>;
}

#[async_trait]
pub trait WorkingHoursProvider: Send + Sync {
    async fn working_hours(&self) -> Result<WorkingHoursConfig>;
}
