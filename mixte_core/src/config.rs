//! Configuration management.
//!
//! Settings are layered with figment, later sources overriding earlier ones:
//! 1. Default values
//! 2. TOML file at `<config_dir>/mixte/config.toml`
//! 3. Environment variables prefixed with `MIXTE_`, sections separated by
//!    `__` (e.g. `MIXTE_ACCESS__SESSION_DAYS=14`)

use std::path::{Path, PathBuf};

use chrono::Duration;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::access::{DEFAULT_CONTENT_ROOT, DEFAULT_ENCODED_ALLOW_LIST, DEFAULT_VALIDITY_DAYS};
use crate::errors::{CalcError, CalcResult};
use crate::format::NumberFormat;

const CONFIG_FILE_NAME: &str = "config.toml";

const APP_DIR_NAME: &str = "mixte";

const SESSION_FILE_NAME: &str = "session.json";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MIXTE_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub access: AccessConfig,
    pub protection: ProtectionConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Base64 of the comma-separated allowed emails and `@domain` entries
    pub allow_list: String,
    /// Session validity in days
    pub session_days: u32,
    /// Session file of the native store.
    /// Defaults to `<data_local_dir>/mixte/session.json`
    pub session_file: Option<PathBuf>,
    /// Folder holding the course pages, used to compute login redirects
    pub content_root: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// Intercept copy shortcuts, context menu, selection and drag
    pub enabled: bool,
    /// How long the blocked-action notification stays visible
    pub notification_ms: u64,
    /// Show the reader's identity over the content
    pub watermark: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `1234,50` instead of `1234.50`
    pub decimal_comma: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            allow_list: DEFAULT_ENCODED_ALLOW_LIST.to_string(),
            session_days: DEFAULT_VALIDITY_DAYS as u32,
            session_file: None,
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
        }
    }
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            notification_ms: 2000,
            watermark: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { decimal_comma: true }
    }
}

impl AccessConfig {
    pub fn session_validity(&self) -> Duration {
        Duration::days(i64::from(self.session_days))
    }
}

impl ProtectionConfig {
    pub fn notification_duration(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.notification_ms).unwrap_or(i64::MAX))
    }
}

impl DisplayConfig {
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat {
            decimal_comma: self.decimal_comma,
        }
    }
}

impl Config {
    /// Load from the default file location and the environment
    pub fn load() -> CalcResult<Self> {
        Self::load_from(None)
    }

    /// Load with an optional custom config file.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(config_path: Option<PathBuf>) -> CalcResult<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        let config = Self::figment(&config_file).extract::<Config>()?;
        config.validate()?;
        tracing::debug!(path = %config_file.display(), "configuration loaded");
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Session file, resolving the default if not set
    pub fn session_file(&self) -> PathBuf {
        self.access
            .session_file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(SESSION_FILE_NAME))
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.access.session_days == 0 {
            return Err(CalcError::config("access.session_days must be greater than 0"));
        }

        let root = self.access.content_root.trim();
        if root.is_empty() || root.contains(['/', '\\']) {
            return Err(CalcError::config(format!(
                "access.content_root must be a single folder name, got '{}'",
                self.access.content_root
            )));
        }

        if self.protection.notification_ms == 0 {
            return Err(CalcError::config("protection.notification_ms must be greater than 0"));
        }

        Ok(())
    }

    /// TOML rendering, for `config show`
    pub fn to_toml(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError { reason: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.access.session_days, 7);
        assert_eq!(config.access.content_root, "cours");
        assert!(config.protection.enabled);
        assert_eq!(config.protection.notification_ms, 2000);
        assert!(config.display.decimal_comma);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.access.session_validity(), Duration::days(7));
        assert_eq!(config.protection.notification_duration(), Duration::seconds(2));
    }

    #[test]
    fn test_validate_zero_session_days() {
        let mut config = Config::default();
        config.access.session_days = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("session_days"));
    }

    #[test]
    fn test_validate_content_root() {
        let mut config = Config::default();
        config.access.content_root = "site/cours".to_string();
        assert!(config.validate().is_err());
        config.access.content_root = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_file_default_and_custom() {
        let mut config = Config::default();
        assert!(config.session_file().ends_with("mixte/session.json"));
        config.access.session_file = Some(PathBuf::from("/tmp/s.json"));
        assert_eq!(config.session_file(), PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_load_nonexistent_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [access]
                session_days = 14
                content_root = "lessons"

                [display]
                decimal_comma = false
                "#,
            )?;
            jail.set_env("MIXTE_ACCESS__SESSION_DAYS", "3");
            jail.set_env("MIXTE_PROTECTION__ENABLED", "false");

            let config = Config::load_from(Some(PathBuf::from("config.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.access.session_days, 3);
            assert_eq!(config.access.content_root, "lessons");
            assert!(!config.protection.enabled);
            assert!(!config.display.decimal_comma);
            assert_eq!(config.protection.notification_ms, 2000);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_file_value_is_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[protection]\nnotification_ms = 0\n")?;
            let err = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap_err();
            assert_eq!(err.error_code(), "CONFIG_ERROR");
            Ok(())
        });
    }

    #[test]
    fn test_toml_rendering() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("[access]"));
        assert!(text.contains("session_days = 7"));
    }
}
