//! Settings validation.
//!
//! # Responsibilities
//! - Required fields are present (serde only handles syntax)
//! - URLs parse
//! - The update interval parses to a non-zero duration
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: &Settings → Result<(), Vec<ValidationError>>

use std::fmt;
use std::time::Duration;

use crate::config::schema::Settings;

/// A single problem found in the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Settings key the problem refers to.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Parse an update interval such as "1h", "30m" or "1h 30m".
pub fn parse_interval(raw: &str) -> Result<Duration, ValidationError> {
    let interval = humantime::parse_duration(raw.trim()).map_err(|e| {
        ValidationError::new("update_interval", format!("invalid interval {:?}: {}", raw, e))
    })?;
    if interval.is_zero() {
        return Err(ValidationError::new(
            "update_interval",
            "interval must be greater than zero",
        ));
    }
    Ok(interval)
}

/// Validate loaded settings.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.subscribe_url.trim().is_empty() {
        errors.push(ValidationError::new("subscribe_url", "must not be empty"));
    } else if let Err(e) = url::Url::parse(&settings.subscribe_url) {
        errors.push(ValidationError::new(
            "subscribe_url",
            format!("invalid URL: {}", e),
        ));
    }

    if settings.base_config_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("base_config_path", "must not be empty"));
    }

    if settings.reload_enabled() {
        if let Err(e) = url::Url::parse(&settings.mihomo_api_url) {
            errors.push(ValidationError::new(
                "mihomo_api_url",
                format!("invalid URL: {}", e),
            ));
        }
    }

    if let Err(e) = parse_interval(&settings.update_interval) {
        errors.push(e);
    }

    if let Some(addr) = &settings.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "metrics_address",
                format!("invalid socket address {:?}", addr),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Settings {
        Settings {
            subscribe_url: "https://example.com/sub".into(),
            base_config_path: "/etc/mihomo/base.yaml".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid()).is_ok());
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let errors = validate_settings(&Settings::default()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"subscribe_url"));
        assert!(fields.contains(&"base_config_path"));
    }

    #[test]
    fn test_bad_interval_rejected() {
        let settings = Settings {
            update_interval: "abc".into(),
            ..valid()
        };
        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "update_interval");
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_interval("30m").unwrap(), Duration::from_secs(1800));
        assert_eq!(parse_interval("1h 30m").unwrap(), Duration::from_secs(5400));
        assert!(parse_interval("abc").is_err());
        assert!(parse_interval("0s").is_err());
    }

    #[test]
    fn test_bad_api_url_rejected() {
        let settings = Settings {
            mihomo_api_url: "not a url".into(),
            ..valid()
        };
        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors[0].field, "mihomo_api_url");
    }
}
