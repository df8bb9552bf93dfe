// Adapters layer: concrete calendar sources and batch file formats.

pub mod csv_batch;
pub mod http_holidays;
pub mod static_provider;

use crate::domain::model::HolidaySet;
use crate::domain::ports::HolidayProvider;
use crate::utils::error::Result;
use async_trait::async_trait;

pub use http_holidays::HttpHolidayProvider;
pub use static_provider::StaticCalendarProvider;

/// Holiday source chosen at startup from the configuration.
#[derive(Debug, Clone)]
pub enum HolidaySource {
    Static(StaticCalendarProvider),
    Http(HttpHolidayProvider),
}

#[async_trait]
impl HolidayProvider for HolidaySource {
    async fn holidays(&self) -> Result<HolidaySet> {
        match self {
            HolidaySource::Static(provider) => provider.holidays().await,
            HolidaySource::Http(provider) => provider.holidays().await,
        }
    }
}
