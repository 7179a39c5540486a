//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `matching.access_token`.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Environment variable overriding `map.style`.
pub const MAP_STYLE_ENV: &str = "MAPBOX_MAP_STYLE";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
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
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load, apply environment overrides, and validate configuration.
///
/// Without a path the built-in defaults are used, so a token supplied
/// through the environment is enough to start.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_config(&fs::read_to_string(path).map_err(ConfigError::Io)?)?,
        None => AppConfig::default(),
    };
    finish(config, |key| std::env::var(key).ok())
}

/// Parse TOML without touching the environment or validating.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Apply overrides from `lookup` and validate.
pub fn finish(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    apply_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|t| !t.is_empty()) {
        config.matching.access_token = token;
    }
    if let Some(style) = lookup(MAP_STYLE_ENV).filter(|s| !s.is_empty()) {
        config.map.style = style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_token_overrides_file() {
        let config = parse_config(
            r#"
            [matching]
            access_token = "pk.file"
            "#,
        )
        .unwrap();

        let config = finish(config, |key| match key {
            ACCESS_TOKEN_ENV => Some("pk.env".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.matching.access_token, "pk.env");
    }

    #[test]
    fn test_empty_env_value_ignored() {
        let config = parse_config("[matching]\naccess_token = \"pk.file\"").unwrap();
        let config = finish(config, |_| Some(String::new())).unwrap();
        assert_eq!(config.matching.access_token, "pk.file");
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let result = finish(AppConfig::default(), |_| None);
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("matching.access_token"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[matching\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("route-snap-{}.toml", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            "[matching]\naccess_token = \"pk.disk\"\nsearch_radius_m = 40.0\n",
        )
        .unwrap();

        let config = load_config(Some(&path));
        std::fs::remove_file(&path).unwrap_or_default();

        let config = config.unwrap();
        assert_eq!(config.matching.search_radius_m, 40.0);
    }
}
