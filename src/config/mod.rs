pub mod env_config;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use self::toml_config::SlaConfig;

/// Flags for the `sla-hours` binary. Flags override the config file and `SLA_*` variables.
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "sla-hours"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Compute SLA deadlines in business hours, skipping weekends and holidays")
)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Start instant (RFC 3339, or YYYY-MM-DDTHH:MM in the configured timezone). Defaults to now.
    #[cfg_attr(feature = "cli", arg(long))]
    pub start: Option<String>,

    /// Business hours to add (defaults to sla.default_hours, 4 if unset)
    #[cfg_attr(feature = "cli", arg(long))]
    pub hours: Option<f64>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub start_hour: Option<u32>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub end_hour: Option<u32>,

    /// Extra holidays, comma separated YYYY-MM-DD
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub holidays: Vec<String>,

    /// IANA timezone of the working calendar
    #[cfg_attr(feature = "cli", arg(long))]
    pub timezone: Option<String>,

    /// Path to a TOML calendar configuration
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    /// Also report the SLA status of the deadline as seen at this instant
    #[cfg_attr(feature = "cli", arg(long))]
    pub status_at: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Print the result as JSON"))]
    pub json: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl CliConfig {
    pub fn apply_to(&self, config: &mut SlaConfig) {
        if let Some(hour) = self.start_hour {
            config.working_hours.start_hour = Some(hour);
        }
        if let Some(hour) = self.end_hour {
            config.working_hours.end_hour = Some(hour);
        }
        if let Some(timezone) = &self.timezone {
            config.working_hours.timezone = Some(timezone.clone());
        }
        config.holidays.dates.extend(self.holidays.iter().cloned());
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = CliConfig::parse_from([
            "sla-hours",
            "--start",
            "2025-03-07T17:00",
            "--hours",
            "2",
            "--end-hour",
            "17",
            "--holidays",
            "2025-03-10,2025-03-11",
        ]);
        assert_eq!(cli.hours, Some(2.0));

        let mut config = SlaConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.working_hours().unwrap().end_hour, 17);
        assert_eq!(config.holiday_set().unwrap().len(), 2);
    }
}
