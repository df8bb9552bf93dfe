use crate::utils::error::{Result, SlaError};
use chrono_tz::Tz;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SlaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_timezone(field_name: &str, name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Unknown IANA timezone (e.g. America/Bogota)".to_string(),
        })
}

pub fn validate_non_negative_hours(field_name: &str, hours: f64) -> Result<()> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: hours.to_string(),
            reason: "Value must be a finite, non-negative number of hours".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SlaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.holidays_url", "https://example.com/holidays").is_ok());
        assert!(validate_url("source.holidays_url", "http://example.com").is_ok());
        assert!(validate_url("source.holidays_url", "").is_err());
        assert!(validate_url("source.holidays_url", "invalid-url").is_err());
        assert!(validate_url("source.holidays_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_timezone() {
        assert_eq!(
            validate_timezone("timezone", "America/Bogota").unwrap(),
            chrono_tz::America::Bogota
        );
        assert!(validate_timezone("timezone", "Mars/Olympus").is_err());
    }

    #[test]
    fn test_validate_hours_and_range() {
        assert!(validate_non_negative_hours("sla.default_hours", 4.0).is_ok());
        assert!(validate_non_negative_hours("sla.default_hours", 0.0).is_ok());
        assert!(validate_non_negative_hours("sla.default_hours", -0.5).is_err());
        assert!(validate_non_negative_hours("sla.default_hours", f64::NAN).is_err());

        assert!(validate_range("working_hours.start_hour", 8, 0, 23).is_ok());
        assert!(validate_range("working_hours.start_hour", 24, 0, 23).is_err());
    }

    #[test]
    fn test_validate_non_empty_and_path() {
        assert!(validate_non_empty_string("id", "  ").is_err());
        assert!(validate_path("batch.output", "out.csv").is_ok());
        assert!(validate_path("batch.output", "").is_err());
    }
}
