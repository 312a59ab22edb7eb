use std::path::Path;

use tracing::Level;

use crate::error::ConfigError;
use crate::game::DEFAULT_FADE_RATE;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub popup: PopupConfig,
    pub animation: AnimationConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Fade units per second; the overlay is opaque at 255.
    pub fade_rate: f32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            fade_rate: DEFAULT_FADE_RATE,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Rows per second for a falling piece.
    pub fall_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig { fall_speed: 12.0 }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll timeout, which also paces the frame loop.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { tick_ms: 16 }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.level.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "logging.level '{}' must be one of trace, debug, info, warn, error",
                self.level
            ))
        })
    }
}

/// Where a loaded [`AppConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was missing; callers should warn once logging is up.
    Defaults,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist. The logging level lives in the config, so the fallback is
    /// reported to the caller rather than logged here.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, ConfigSource::File))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.popup.fade_rate.is_nan() || self.popup.fade_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "popup.fade_rate must be > 0".into(),
            ));
        }
        if self.animation.fall_speed.is_nan() || self.animation.fall_speed <= 0.0 {
            return Err(ConfigError::Validation(
                "animation.fall_speed must be > 0".into(),
            ));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Validation("ui.tick_ms must be > 0".into()));
        }
        self.logging.level()?;

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[popup]
fade_rate = 300.0
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.popup.fade_rate - 300.0).abs() < 1e-6);
        assert!((config.animation.fall_speed - 12.0).abs() < 1e-6);
        assert_eq!(config.ui.tick_ms, 16);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!((config.popup.fade_rate - DEFAULT_FADE_RATE).abs() < 1e-6);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_rejects_zero_fade_rate() {
        let mut config = AppConfig::default();
        config.popup.fade_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_nan_fall_speed() {
        let mut config = AppConfig::default();
        config.animation.fall_speed = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_tick() {
        let mut config = AppConfig::default();
        config.ui.tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_level_parses() {
        let mut config = AppConfig::default();
        config.logging.level = "debug".into();
        assert_eq!(config.logging.level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let (config, source) =
            AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.ui.tick_ms, 16);
    }

    #[test]
    fn test_load_or_default_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect-four.toml");
        std::fs::write(&path, "[ui]\ntick_ms = 20\n").unwrap();

        let (config, source) = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(source, ConfigSource::File);
        assert_eq!(config.ui.tick_ms, 20);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect-four.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[ui]
tick_ms = 33
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.ui.tick_ms, 33);
        assert!((config.popup.fade_rate - DEFAULT_FADE_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[animation]\nfall_speed = -1.0\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = AppConfig::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
