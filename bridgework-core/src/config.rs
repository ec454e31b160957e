//! Configuration types for Bridgework

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::image::MAX_KSIZE;

/// Main configuration for Bridgework
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BridgeworkConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Laplacian scale space parameters
    #[serde(default)]
    pub scale_space: ScaleSpaceConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Parameters for building a Laplacian scale space
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaleSpaceConfig {
    /// Kernel size for the Gaussian and derivative filters (odd)
    pub ksize: usize,

    /// Number of scales to compute
    pub levels: usize,

    /// Sigma of the first scale
    pub sigma: f64,

    /// Multiplier applied to sigma between scales
    pub sigma_step: f64,
}

impl Default for ScaleSpaceConfig {
    fn default() -> Self {
        Self {
            ksize: 5,
            levels: 10,
            sigma: 1.0,
            sigma_step: 1.2,
        }
    }
}

impl ScaleSpaceConfig {
    /// Check the parameters before any filtering happens.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an even kernel or one outside
    /// `3..=MAX_KSIZE`, zero levels, or a non-positive sigma or sigma step.
    pub fn validate(&self) -> Result<()> {
        if self.ksize < 3 || self.ksize > MAX_KSIZE || self.ksize % 2 == 0 {
            return Err(BridgeError::invalid(format!(
                "kernel size must be odd and between 3 and {}, got {}",
                MAX_KSIZE, self.ksize
            )));
        }
        if self.levels == 0 {
            return Err(BridgeError::invalid("scale space needs at least one level"));
        }
        if !(self.sigma > 0.0) {
            return Err(BridgeError::invalid(format!(
                "sigma must be positive, got {}",
                self.sigma
            )));
        }
        if !(self.sigma_step > 0.0) {
            return Err(BridgeError::invalid(format!(
                "sigma step must be positive, got {}",
                self.sigma_step
            )));
        }
        Ok(())
    }
}

/// Builder for BridgeworkConfig
pub struct ConfigBuilder {
    config: BridgeworkConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: BridgeworkConfig::default(),
        }
    }

    /// Set logging configuration
    pub fn logging(mut self, config: LoggingConfig) -> Self {
        self.config.logging = config;
        self
    }

    /// Set the default log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Set scale space configuration
    pub fn scale_space(mut self, config: ScaleSpaceConfig) -> Self {
        self.config.scale_space = config;
        self
    }

    /// Build the configuration
    pub fn build(self) -> BridgeworkConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable naming an extra configuration file
pub const CONFIG_PATH_ENV: &str = "BRIDGEWORK_CONFIG_PATH";

/// `BRIDGEWORK_*` variables, nested keys split on `__`
fn env_overrides() -> figment::providers::Env {
    figment::providers::Env::prefixed("BRIDGEWORK_")
        .ignore(&["CONFIG_PATH"])
        .split("__")
}

impl BridgeworkConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Loads in this order:
    /// 1. Default configuration
    /// 2. `bridgework.toml` in the working directory
    /// 3. File named by `BRIDGEWORK_CONFIG_PATH`
    /// 4. `BRIDGEWORK_` environment variables (`BRIDGEWORK_SCALE_SPACE__LEVELS=20`)
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is invalid or the result fails validation.
    pub fn load() -> Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Serialized, Toml},
        };

        let mut figment = Figment::from(Serialized::defaults(BridgeworkConfig::default()))
            .merge(Toml::file("bridgework.toml"));

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            figment = figment.merge(Toml::file(path));
        }

        let config: BridgeworkConfig = figment
            .merge(env_overrides())
            .extract()
            .map_err(|e| {
                BridgeError::Configuration(format!("Failed to load configuration: {}", e))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, then apply the
    /// `BRIDGEWORK_` environment variables on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Serialized, Toml},
        };

        let path = path.as_ref();
        if !path.exists() {
            return Err(BridgeError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let config: BridgeworkConfig =
            Figment::from(Serialized::defaults(BridgeworkConfig::default()))
                .merge(Toml::file(path))
                .merge(env_overrides())
                .extract()
                .map_err(|e| {
                    BridgeError::Configuration(format!(
                        "Failed to load configuration file: {}",
                        e
                    ))
                })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "logging.level must not be empty".to_string(),
            ));
        }
        self.scale_space
            .validate()
            .map_err(|e| BridgeError::Configuration(format!("scale_space: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = BridgeworkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.scale_space.ksize, 5);
        assert_eq!(config.scale_space.levels, 10);
    }

    #[test]
    fn test_builder() {
        let config = ConfigBuilder::new()
            .log_level("debug")
            .scale_space(ScaleSpaceConfig {
                levels: 3,
                ..Default::default()
            })
            .build();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.scale_space.levels, 3);
        assert_eq!(config.scale_space.sigma_step, 1.2);
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scale_space]\nlevels = 4\nsigma = 2.0").unwrap();

        let config = BridgeworkConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scale_space.levels, 4);
        assert_eq!(config.scale_space.sigma, 2.0);
        assert_eq!(config.scale_space.ksize, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_rejects_even_kernel() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scale_space]\nksize = 4").unwrap();

        let err = BridgeworkConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, BridgeError::Configuration(_)));
    }

    #[test]
    fn test_from_file_applies_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[scale_space]\nlevels = 6")?;
            jail.set_env("BRIDGEWORK_SCALE_SPACE__SIGMA_STEP", "1.5");

            let config = BridgeworkConfig::from_file("custom.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.scale_space.levels, 6);
            assert_eq!(config.scale_space.sigma_step, 1.5);
            Ok(())
        });
    }

    #[test]
    fn test_from_file_missing() {
        let err = BridgeworkConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, BridgeError::Configuration(_)));
    }

    #[test]
    fn test_scale_space_validation() {
        let base = ScaleSpaceConfig::default();
        assert!(ScaleSpaceConfig { levels: 0, ..base.clone() }.validate().is_err());
        assert!(ScaleSpaceConfig { sigma: 0.0, ..base.clone() }.validate().is_err());
        assert!(ScaleSpaceConfig { sigma_step: -1.0, ..base.clone() }.validate().is_err());
        assert!(ScaleSpaceConfig { ksize: 1, ..base.clone() }.validate().is_err());
        assert!(ScaleSpaceConfig { ksize: 67, ..base.clone() }.validate().unwrap_err().is_invalid_input());
        assert!(ScaleSpaceConfig { ksize: 33, ..base.clone() }.validate().is_err());
        assert!(ScaleSpaceConfig { ksize: 31, ..base.clone() }.validate().is_ok());
        assert!(ScaleSpaceConfig { ksize: 7, ..base }.validate().is_ok());
    }
}
