//! Settings loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationError};

/// Default settings file, resolved against the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "mihomo-updater.yaml";

/// Error type for settings loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Toml(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Yaml(e) => write!(f, "Parse error: {}", e),
            ConfigError::Toml(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Validation(vec![err])
    }
}

/// Parse settings text. Files ending in `.toml` are TOML, everything else YAML.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings, ConfigError> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let mut settings: Settings = if is_toml {
        toml::from_str(content).map_err(ConfigError::Toml)?
    } else if content.trim().is_empty() {
        Settings::default()
    } else {
        serde_yaml::from_str(content).map_err(ConfigError::Yaml)?
    };

    settings.normalize();
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}

/// Load and validate settings from a YAML or TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_settings(&content, path)
}
