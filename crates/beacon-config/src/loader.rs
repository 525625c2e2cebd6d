//! Settings loading with environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::Settings;
use crate::validator::SettingsValidator;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Variable naming the settings file.
pub const ENV_CONFIG_PATH: &str = "BEACON_CONFIG";
/// Overrides `beacon.name`.
pub const ENV_NAME: &str = "BEACON_NAME";
/// Overrides `beacon.interval_ms`.
pub const ENV_INTERVAL_MS: &str = "BEACON_INTERVAL_MS";
/// Overrides `beacon.source_path`.
pub const ENV_SOURCE: &str = "BEACON_SOURCE";
/// Overrides `logging.level`.
pub const ENV_LOG: &str = "BEACON_LOG";

/// Settings file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl SettingsFormat {
    /// Picks the format from `path`'s extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }

    /// Parses `content` in this format. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser's error.
    pub fn parse(self, content: &str) -> ConfigResult<Settings> {
        let settings = match self {
            Self::Toml => toml::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        };
        Ok(settings)
    }
}

/// Settings loader for the `beacon` binary.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads the file at `path`, applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, an override is
    /// malformed, or the result does not validate.
    pub async fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Settings> {
        let settings = Self::read_file(path.as_ref()).await?;
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }

    /// Loads from `path` when given, else from `BEACON_CONFIG` when set,
    /// else from defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// See [`SettingsLoader::load_from_file`].
    pub async fn load(path: Option<PathBuf>) -> ConfigResult<Settings> {
        let settings = Self::read(path).await?;
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }

    /// Like [`SettingsLoader::load`] but without validation, for callers
    /// that layer further overrides on top before validating.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or an override is
    /// malformed.
    pub async fn read(path: Option<PathBuf>) -> ConfigResult<Settings> {
        let path = path.or_else(|| env::var_os(ENV_CONFIG_PATH).map(PathBuf::from));

        if let Some(path) = path {
            return Self::read_file(&path).await;
        }

        debug!("No settings file given, using defaults");
        let mut settings = Settings::default();
        Self::apply_env_overrides(&mut settings)?;
        Ok(settings)
    }

    async fn read_file(path: &Path) -> ConfigResult<Settings> {
        let format = SettingsFormat::from_path(path)?;

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut settings = format.parse(&content)?;
        Self::apply_env_overrides(&mut settings)?;

        info!(path = %path.display(), ?format, "Settings file loaded");
        Ok(settings)
    }

    /// Applies `BEACON_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParse`] for a non-numeric interval.
    pub fn apply_env_overrides(settings: &mut Settings) -> ConfigResult<()> {
        Self::apply_overrides(settings, |var| env::var(var).ok())
    }

    /// Applies overrides read through `lookup` instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParse`] for a non-numeric interval.
    pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_NAME) {
            settings.beacon.name = name;
        }

        if let Some(interval) = lookup(ENV_INTERVAL_MS) {
            settings.beacon.interval_ms =
                interval
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::EnvParse {
                        var: ENV_INTERVAL_MS,
                        message: e.to_string(),
                    })?;
        }

        if let Some(source) = lookup(ENV_SOURCE) {
            settings.beacon.source_path = PathBuf::from(source);
        }

        if let Some(level) = lookup(ENV_LOG) {
            settings.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogFormat;
    use beacon_common::test_utils::config_fixtures;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> = vars
            .iter()
            .map(|(k, v)| (*k, (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SettingsFormat::from_path(Path::new("beacon.toml")).unwrap(),
            SettingsFormat::Toml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("beacon.YML")).unwrap(),
            SettingsFormat::Yaml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("dir/beacon.json")).unwrap(),
            SettingsFormat::Json
        );

        let err = SettingsFormat::from_path(Path::new("beacon")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { ref extension } if extension.is_empty()));
    }

    #[test]
    fn test_parse_minimal_toml_fills_defaults() {
        let settings = SettingsFormat::Toml
            .parse(config_fixtures::minimal_settings_toml())
            .unwrap();
        assert_eq!(settings.beacon.name, "motd");
        assert_eq!(settings.beacon.interval_ms, crate::DEFAULT_INTERVAL_MS);
        assert_eq!(settings.logging, crate::LoggingSettings::default());
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = SettingsFormat::Yaml
            .parse(config_fixtures::full_settings_yaml())
            .unwrap();
        assert_eq!(yaml.beacon.interval_ms, 5000);
        assert_eq!(yaml.beacon.default_value.as_deref(), Some("warming up"));
        assert_eq!(yaml.logging.format, LogFormat::Compact);
        assert_eq!(yaml.requests.every_ms, 250);

        let json = SettingsFormat::Json
            .parse(config_fixtures::full_settings_json())
            .unwrap();
        assert_eq!(json.beacon.interval_ms, 1500);
        assert_eq!(json.beacon.default_value, None);
        assert_eq!(json.logging.level, "warn");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SettingsFormat::Json.parse("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_overrides() {
        let mut settings = Settings::default();
        SettingsLoader::apply_overrides(
            &mut settings,
            lookup_from(&[
                (ENV_NAME, "greeting"),
                (ENV_INTERVAL_MS, " 250 "),
                (ENV_SOURCE, "/srv/greeting.txt"),
                (ENV_LOG, "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.beacon.name, "greeting");
        assert_eq!(settings.beacon.interval_ms, 250);
        assert_eq!(settings.beacon.source_path, PathBuf::from("/srv/greeting.txt"));
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_bad_interval_override() {
        let mut settings = Settings::default();
        let err = SettingsLoader::apply_overrides(
            &mut settings,
            lookup_from(&[(ENV_INTERVAL_MS, "soon")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParse { var: ENV_INTERVAL_MS, .. }));
    }

    #[test]
    fn test_no_overrides_keeps_settings() {
        let mut settings = Settings::default();
        SettingsLoader::apply_overrides(&mut settings, |_| None).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
