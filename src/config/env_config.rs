use crate::config::toml_config::SlaConfig;
use crate::utils::error::{Result, SlaError};
use std::collections::HashMap;
use std::env;

/// Overrides read from `SLA_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    pub timezone: Option<String>,
    pub holidays: Vec<String>,
    pub holidays_url: Option<String>,
    pub default_hours: Option<f64>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Ok(Self {
            start_hour: parse_var(&vars, "SLA_START_HOUR")?,
            end_hour: parse_var(&vars, "SLA_END_HOUR")?,
            timezone: vars.get("SLA_TIMEZONE").cloned(),
            holidays: vars
                .get("SLA_HOLIDAYS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            holidays_url: vars.get("SLA_HOLIDAYS_URL").cloned(),
            default_hours: parse_var(&vars, "SLA_DEFAULT_HOURS")?,
        })
    }

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
        if let Some(url) = &self.holidays_url {
            config.source.holidays_url = Some(url.clone());
        }
        if let Some(hours) = self.default_hours {
            config.sla.default_hours = Some(hours);
        }
    }
}

fn parse_var<T: std::str::FromStr>(vars: &HashMap<String, String>, name: &str) -> Result<Option<T>> {
    match vars.get(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SlaError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "Cannot parse environment variable".to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_and_apply() {
        let env = EnvConfig::from_vars([
            ("SLA_START_HOUR", "7"),
            ("SLA_END_HOUR", "17"),
            ("SLA_HOLIDAYS", "2025-03-24, 2025-04-17,"),
            ("SLA_TIMEZONE", "America/Lima"),
            ("UNRELATED", "x"),
        ])
        .unwrap();

        assert_eq!(env.start_hour, Some(7));
        assert_eq!(env.holidays, vec!["2025-03-24", "2025-04-17"]);

        let mut config = SlaConfig::default();
        config.holidays.dates.push("2025-01-01".to_string());
        env.apply_to(&mut config);

        assert_eq!(config.working_hours().unwrap().hours_per_day(), 10);
        assert_eq!(config.timezone_name(), "America/Lima");
        assert_eq!(config.holiday_set().unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_number() {
        let result = EnvConfig::from_vars([("SLA_START_HOUR", "eight")]);
        assert!(matches!(
            result,
            Err(SlaError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_empty_environment() {
        let env = EnvConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(env, EnvConfig::default());
    }
}
