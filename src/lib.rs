pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{HolidaySource, HttpHolidayProvider, StaticCalendarProvider};
pub use crate::config::{env_config::EnvConfig, toml_config::SlaConfig, CliConfig};
pub use crate::core::business_hours::{
    adjust_start, business_hours_between, calculate_deadline, is_within_business_hours,
    is_working_day, next_working_day_start,
};
pub use crate::core::deadline_service::DeadlineService;
pub use crate::core::sla::{SlaState, SlaStatus};
pub use crate::domain::model::{
    BusinessCalendar, DeadlineRequest, DeadlineResponse, HolidaySet, WorkingHoursConfig,
};
pub use crate::utils::error::{Result, SlaError};
