//! TOML-based engine configuration.
//!
//! Holds:
//! - The life-expectancy horizon progress is measured against
//! - The per-minute and per-day rates behind the fun-fact counters
//! - The three timer-chain periods
//!
//! Configuration is read from `$LIFECLOCK_CONFIG` if set, otherwise from
//! `~/.config/lifeclock/config.toml`. A missing file yields the defaults.
//! The file is only ever read.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Life-expectancy horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeConfig {
    #[serde(default = "default_expectancy_years")]
    pub expectancy_years: f64,
}

/// Rates used to derive heartbeats, breaths and steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesConfig {
    #[serde(default = "default_heartbeats_per_minute")]
    pub heartbeats_per_minute: u64,
    #[serde(default = "default_breaths_per_minute")]
    pub breaths_per_minute: u64,
    #[serde(default = "default_steps_per_day")]
    pub steps_per_day: u64,
}

/// Timer-chain periods in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
    #[serde(default = "default_progress_ms")]
    pub progress_ms: u64,
    #[serde(default = "default_beacon_ms")]
    pub beacon_ms: u64,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub life: LifeConfig,
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

// Default functions
fn default_expectancy_years() -> f64 {
    90.0
}
fn default_heartbeats_per_minute() -> u64 {
    72
}
fn default_breaths_per_minute() -> u64 {
    17
}
fn default_steps_per_day() -> u64 {
    6000
}
fn default_refresh_ms() -> u64 {
    1000
}
fn default_progress_ms() -> u64 {
    30
}
fn default_beacon_ms() -> u64 {
    75
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            expectancy_years: default_expectancy_years(),
        }
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            heartbeats_per_minute: default_heartbeats_per_minute(),
            breaths_per_minute: default_breaths_per_minute(),
            steps_per_day: default_steps_per_day(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_ms: default_refresh_ms(),
            progress_ms: default_progress_ms(),
            beacon_ms: default_beacon_ms(),
        }
    }
}

impl TimingConfig {
    pub fn refresh_period(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.refresh_ms as i64)
    }

    pub fn progress_period(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.progress_ms as i64)
    }

    pub fn beacon_period(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.beacon_ms as i64)
    }
}

/// Upper bound on any timer period: one hour.
const MAX_PERIOD_MS: u64 = 3_600_000;

/// Returns `~/.config/lifeclock[-dev]/` based on LIFECLOCK_ENV.
///
/// Set LIFECLOCK_ENV=dev to use the development directory. The directory
/// is not created.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LIFECLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("lifeclock-dev")
    } else {
        base_dir.join("lifeclock")
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Effective config file location.
    pub fn path() -> PathBuf {
        match std::env::var_os("LIFECLOCK_CONFIG") {
            Some(path) => PathBuf::from(path),
            None => config_dir().join("config.toml"),
        }
    }

    /// Load from [`Config::path`], or defaults if no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from an explicit path, or defaults if no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this shape or a
    /// value is out of range.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let years = self.life.expectancy_years;
        if !years.is_finite() || years <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "life.expectancy_years".into(),
                message: format!("must be a positive number of years, got {years}"),
            });
        }

        let periods = [
            ("timing.refresh_ms", self.timing.refresh_ms),
            ("timing.progress_ms", self.timing.progress_ms),
            ("timing.beacon_ms", self.timing.beacon_ms),
        ];
        for (key, ms) in periods {
            if ms == 0 || ms > MAX_PERIOD_MS {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must be between 1 and {MAX_PERIOD_MS} ms, got {ms}"),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.life.expectancy_years, 90.0);
        assert_eq!(cfg.rates.heartbeats_per_minute, 72);
        assert_eq!(cfg.rates.breaths_per_minute, 17);
        assert_eq!(cfg.rates.steps_per_day, 6000);
        assert_eq!(cfg.timing.refresh_ms, 1000);
        assert_eq!(cfg.timing.progress_ms, 30);
        assert_eq!(cfg.timing.beacon_ms, 75);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg = Config::from_toml("[life]\nexpectancy_years = 80.0\n").unwrap();
        assert_eq!(cfg.life.expectancy_years, 80.0);
        assert_eq!(cfg.timing, TimingConfig::default());
        assert_eq!(cfg.rates, RatesConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("life.expectancy_years").as_deref(), Some("90.0"));
        assert_eq!(cfg.get("timing.beacon_ms").as_deref(), Some("75"));
        assert!(cfg.get("timing.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn rejects_non_positive_expectancy() {
        let err = Config::from_toml("[life]\nexpectancy_years = 0.0\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "life.expectancy_years"),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_period() {
        let err = Config::from_toml("[timing]\nprogress_ms = 0\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "timing.progress_ms"),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_type() {
        let err = Config::from_toml("[timing]\nrefresh_ms = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }

    #[test]
    fn load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rates]\nsteps_per_day = 8000").unwrap();
        let cfg = Config::load_from(file.path()).unwrap();
        assert_eq!(cfg.rates.steps_per_day, 8000);
        assert_eq!(cfg.rates.heartbeats_per_minute, 72);
    }

    #[test]
    fn period_helpers_convert_milliseconds() {
        let timing = TimingConfig::default();
        assert_eq!(timing.refresh_period(), TimeDelta::seconds(1));
        assert_eq!(timing.progress_period(), TimeDelta::milliseconds(30));
        assert_eq!(timing.beacon_period(), TimeDelta::milliseconds(75));
    }
}
