use crate::adapters::{HolidaySource, HttpHolidayProvider, StaticCalendarProvider};
use crate::core::deadline_service::DeadlineService;
use crate::core::sla::DEFAULT_AT_RISK_HOURS;
use crate::domain::model::{
    HolidaySet, WorkingHoursConfig, DEFAULT_END_HOUR, DEFAULT_REQUIRED_HOURS, DEFAULT_START_HOUR,
    DEFAULT_TIMEZONE,
};
use crate::utils::error::{Result, SlaError};
use crate::utils::validation::{self, Validate};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Calendar configuration file. Every section is optional.
///
/// ```toml
/// [working_hours]
/// start_hour = 8
/// end_hour = 18
/// timezone = "America/Bogota"
///
/// [holidays]
/// dates = ["2025-03-24", "2025-04-17"]
/// recurring = ["01-01", "12-25"]
///
/// [sla]
/// default_hours = 4
/// at_risk_hours = 1
///
/// [source]
/// holidays_url = "${HOLIDAYS_URL}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlaConfig {
    #[serde(default)]
    pub working_hours: WorkingHoursSection,
    #[serde(default)]
    pub holidays: HolidaysSection,
    #[serde(default)]
    pub sla: SlaSection,
    #[serde(default)]
    pub source: SourceSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkingHoursSection {
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidaysSection {
    #[serde(default)]
    pub dates: Vec<String>,
    /// `MM-DD` entries repeated every year.
    #[serde(default)]
    pub recurring: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlaSection {
    pub default_hours: Option<f64>,
    pub at_risk_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub holidays_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl SlaConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SlaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SlaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOLIDAYS_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SlaError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let working_hours = self.working_hours()?;
        validation::validate_range("working_hours.start_hour", working_hours.start_hour, 0, 23)?;
        validation::validate_range("working_hours.end_hour", working_hours.end_hour, 0, 23)?;

        self.timezone()?;
        self.holiday_set()?;

        validation::validate_non_negative_hours("sla.default_hours", self.default_hours())?;
        validation::validate_non_negative_hours("sla.at_risk_hours", self.at_risk_hours())?;

        if let Some(url) = &self.source.holidays_url {
            validation::validate_url("source.holidays_url", url)?;
        }

        Ok(())
    }

    pub fn working_hours(&self) -> Result<WorkingHoursConfig> {
        WorkingHoursConfig::new(
            self.working_hours.start_hour.unwrap_or(DEFAULT_START_HOUR),
            self.working_hours.end_hour.unwrap_or(DEFAULT_END_HOUR),
        )
    }

    pub fn timezone_name(&self) -> &str {
        self.working_hours
            .timezone
            .as_deref()
            .unwrap_or(DEFAULT_TIMEZONE)
    }

    pub fn timezone(&self) -> Result<Tz> {
        validation::validate_timezone("working_hours.timezone", self.timezone_name())
    }

    pub fn holiday_set(&self) -> Result<HolidaySet> {
        let mut holidays = HolidaySet::parse(&self.holidays.dates)?;
        for entry in &self.holidays.recurring {
            holidays.insert_recurring_str(entry)?;
        }
        Ok(holidays)
    }

    pub fn default_hours(&self) -> f64 {
        self.sla.default_hours.unwrap_or(DEFAULT_REQUIRED_HOURS)
    }

    pub fn at_risk_hours(&self) -> f64 {
        self.sla.at_risk_hours.unwrap_or(DEFAULT_AT_RISK_HOURS)
    }

    pub fn holidays_url(&self) -> Option<&str> {
        self.source.holidays_url.as_deref()
    }

    /// Remote source when `source.holidays_url` is set, merged with the file's dates.
    pub fn holiday_source(&self) -> Result<HolidaySource> {
        let holidays = self.holiday_set()?;
        match self.holidays_url() {
            Some(url) => {
                let timeout = Duration::from_secs(self.source.timeout_seconds.unwrap_or(10));
                Ok(HolidaySource::Http(
                    HttpHolidayProvider::with_timeout(url, timeout)?.with_extra(holidays),
                ))
            }
            None => Ok(HolidaySource::Static(StaticCalendarProvider::new(
                holidays,
                self.working_hours()?,
            ))),
        }
    }

    pub fn build_service(&self) -> Result<DeadlineService<HolidaySource, StaticCalendarProvider>> {
        self.validate_config()?;
        let working_hours =
            StaticCalendarProvider::new(HolidaySet::default(), self.working_hours()?);

        Ok(
            DeadlineService::new(self.holiday_source()?, working_hours, self.timezone()?)
                .with_default_hours(self.default_hours())
                .with_at_risk_hours(self.at_risk_hours()),
        )
    }
}

impl Validate for SlaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[working_hours]
start_hour = 7
end_hour = 16
timezone = "America/Bogota"

[holidays]
dates = ["2025-03-24", "2025-04-17"]
recurring = ["12-25"]

[sla]
default_hours = 6
at_risk_hours = 2
"#;

        let config = SlaConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.working_hours().unwrap(), WorkingHoursConfig::new(7, 16).unwrap());
        assert_eq!(config.default_hours(), 6.0);
        assert_eq!(config.at_risk_hours(), 2.0);

        let holidays = config.holiday_set().unwrap();
        assert!(holidays.contains(NaiveDate::from_ymd_opt(2025, 3, 24).unwrap()));
        assert!(holidays.contains(NaiveDate::from_ymd_opt(2030, 12, 25).unwrap()));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SlaConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.working_hours().unwrap(), WorkingHoursConfig::default());
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::Bogota);
        assert_eq!(config.default_hours(), 4.0);
        assert!(config.holiday_set().unwrap().is_empty());
        assert!(matches!(config.holiday_source().unwrap(), HolidaySource::Static(_)));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SLA_TEST_HOLIDAYS_URL", "https://calendar.example.com/holidays");

        let toml_content = r#"
[source]
holidays_url = "${SLA_TEST_HOLIDAYS_URL}"
"#;

        let config = SlaConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.holidays_url(),
            Some("https://calendar.example.com/holidays")
        );
        match config.holiday_source().unwrap() {
            HolidaySource::Http(provider) => {
                assert_eq!(provider.url(), "https://calendar.example.com/holidays")
            }
            other => panic!("expected http source, got {:?}", other),
        }

        std::env::remove_var("SLA_TEST_HOLIDAYS_URL");
    }

    #[test]
    fn test_config_validation() {
        let inverted = SlaConfig::from_toml_str("[working_hours]\nstart_hour = 18\nend_hour = 8\n")
            .unwrap();
        assert!(matches!(
            inverted.validate(),
            Err(SlaError::ConfigurationError { .. })
        ));

        let bad_zone =
            SlaConfig::from_toml_str("[working_hours]\ntimezone = \"Nowhere/City\"\n").unwrap();
        assert!(bad_zone.validate().is_err());

        let unresolved =
            SlaConfig::from_toml_str("[source]\nholidays_url = \"${SLA_TEST_UNSET_VAR}\"\n")
                .unwrap();
        assert!(unresolved.validate().is_err());

        let bad_date = SlaConfig::from_toml_str("[holidays]\ndates = [\"2025-02-30\"]\n").unwrap();
        assert!(bad_date.validate().is_err());

        assert!(SlaConfig::from_toml_str("[working_hours\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[working_hours]\nstart_hour = 9\nend_hour = 17\n")
            .unwrap();

        let config = SlaConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.working_hours().unwrap().hours_per_day(), 8);
        assert!(SlaConfig::from_file("/nonexistent/sla.toml").is_err());
    }
}
