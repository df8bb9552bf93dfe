pub mod business_hours;
pub mod deadline_service;
pub mod sla;

pub use crate::domain::model::{BusinessCalendar, HolidaySet, WorkingHoursConfig};
pub use crate::domain::ports::{HolidayProvider, WorkingHoursProvider};
pub use crate::utils::error::Result;
