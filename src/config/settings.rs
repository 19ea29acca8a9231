//! Configuration settings for breathe.
//!
//! Settings are loaded from `~/.breathe/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::BreatheError;
use crate::features::breathing::{
    Catalog, CatalogLoad, IndicatorScale, TechniqueSpec, DEFAULT_STEPS_PER_SECOND,
};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Session settings.
    pub session: SessionConfig,
    /// Techniques added after the built-in catalog.
    pub techniques: Vec<TechniqueSpec>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Breathing session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Technique selected when none is given on the command line.
    #[serde(default = "default_technique")]
    pub default_technique: String,
    /// Animation resolution of the interactive session.
    #[serde(default = "default_steps_per_second")]
    pub steps_per_second: u32,
    /// Indicator size at rest.
    #[serde(default = "default_indicator_min")]
    pub indicator_min: f64,
    /// Indicator size at the top of an inhale.
    #[serde(default = "default_indicator_max")]
    pub indicator_max: f64,
    /// Append completed sessions to the practice log.
    #[serde(default = "default_true")]
    pub record_history: bool,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_technique() -> String {
    "4-7-8 Breathing".to_string()
}

const fn default_steps_per_second() -> u32 {
    DEFAULT_STEPS_PER_SECOND
}

const fn default_indicator_min() -> f64 {
    100.0
}

const fn default_indicator_max() -> f64 {
    200.0
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_technique: default_technique(),
            steps_per_second: default_steps_per_second(),
            indicator_min: default_indicator_min(),
            indicator_max: default_indicator_max(),
            record_history: default_true(),
        }
    }
}

impl SessionConfig {
    /// Indicator bounds.
    #[must_use]
    pub fn indicator_scale(&self) -> IndicatorScale {
        IndicatorScale::new(self.indicator_min, self.indicator_max)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(paths: &Paths) -> Result<Self, BreatheError> {
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, BreatheError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), BreatheError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, BreatheError> {
        serde_yaml::to_string(self)
            .map_err(|e| BreatheError::Config(format!("Failed to serialize config: {e}")))
    }

    /// The built-in catalog plus the configured techniques.
    #[must_use]
    pub fn catalog(&self) -> CatalogLoad {
        Catalog::with_custom(&self.techniques)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.session.default_technique, "4-7-8 Breathing");
        assert_eq!(config.session.steps_per_second, 10);
        assert!(config.session.record_history);
        assert!(config.techniques.is_empty());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.session.default_technique = "Box Breathing".to_string();
        config.session.indicator_max = 250.0;

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.session.default_technique, "Box Breathing");
        assert!((loaded.session.indicator_max - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_with_techniques() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r#"
session:
  steps_per_second: 30
techniques:
  - name: Triangle
    description: Yoga breathing
    pattern: [4, 4, 4]
    cycles: 8
  - name: Broken
    pattern: []
  - name: Relax
    pattern: "4-0-8"
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.session.steps_per_second, 30);
        assert_eq!(config.session.default_technique, "4-7-8 Breathing");
        assert_eq!(config.techniques.len(), 3);

        let load = config.catalog();
        assert_eq!(load.catalog.len(), 5);
        assert_eq!(load.rejected.len(), 1);
        assert_eq!(load.catalog.get(4).unwrap().name(), "Relax");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session: [unclosed").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, BreatheError::Config(_)));
    }
}
