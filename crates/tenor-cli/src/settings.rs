//! Persistent CLI settings.
//!
//! Settings live in a TOML file with an `[output]` table for presentation and
//! an `[engine]` table mapped onto [`EngineConfig`]. A missing file means
//! defaults; missing keys inside a present file also take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tenor_analytics::config::EngineConfig;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,
    /// Decimal places for durations and convexity.
    pub precision: u32,
    /// Enable colored output.
    pub colors: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 4,
            colors: true,
        }
    }
}

/// Everything stored in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Presentation settings.
    pub output: OutputSettings,
    /// Engine defaults.
    pub engine: EngineConfig,
}

impl Settings {
    /// Loads settings from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        let settings = Self::load_unchecked(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`Settings::load`] but keeps out-of-range engine values, so
    /// `tenor config` can inspect and repair them.
    pub fn load_unchecked(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Self =
            toml::from_str(&content).map_err(|e| CliError::input(path, e.message()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(settings)
    }

    /// Checks the engine table.
    pub fn validate(&self) -> CliResult<()> {
        self.engine
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Current value of `key` as text.
    pub fn get(&self, key: ConfigKey) -> String {
        let engine = &self.engine;
        match key {
            ConfigKey::Format => self.output.format.to_string(),
            ConfigKey::Precision => self.output.precision.to_string(),
            ConfigKey::Colors => self.output.colors.to_string(),
            ConfigKey::CurveYieldRange => engine.curve_yield_range.to_string(),
            ConfigKey::CurveSteps => engine.curve_steps.to_string(),
            ConfigKey::KeyRateBump => engine.key_rate_bump.to_string(),
            ConfigKey::EffectiveBump => engine.effective_bump.to_string(),
            ConfigKey::ImmunizationTolerance => engine.immunization_tolerance.to_string(),
            ConfigKey::Parallel => engine.parallel.to_string(),
            ConfigKey::ParallelThreshold => engine.parallel_threshold.to_string(),
        }
    }

    /// Parses and stores `value` under `key`.
    ///
    /// A rejected value leaves the settings unchanged.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> CliResult<()> {
        let invalid = |expected: &str| {
            CliError::Config(format!("invalid value `{value}` for {key}: expected {expected}"))
        };
        let mut candidate = self.clone();

        match key {
            ConfigKey::Format => {
                candidate.output.format = value
                    .parse()
                    .map_err(|_| invalid("table, json, csv, or minimal"))?;
            }
            ConfigKey::Precision => {
                let precision: u32 = value.parse().map_err(|_| invalid("a number"))?;
                if !(2..=10).contains(&precision) {
                    return Err(invalid("a number between 2 and 10"));
                }
                candidate.output.precision = precision;
            }
            ConfigKey::Colors => {
                candidate.output.colors = parse_bool(value).ok_or_else(|| invalid("true or false"))?;
            }
            ConfigKey::CurveYieldRange => {
                candidate.engine.curve_yield_range = value.parse().map_err(|_| invalid("a decimal"))?;
            }
            ConfigKey::CurveSteps => {
                candidate.engine.curve_steps = value.parse().map_err(|_| invalid("an integer"))?;
            }
            ConfigKey::KeyRateBump => {
                candidate.engine.key_rate_bump = value.parse().map_err(|_| invalid("a decimal"))?;
            }
            ConfigKey::EffectiveBump => {
                candidate.engine.effective_bump = value.parse().map_err(|_| invalid("a decimal"))?;
            }
            ConfigKey::ImmunizationTolerance => {
                candidate.engine.immunization_tolerance =
                    value.parse().map_err(|_| invalid("a decimal"))?;
            }
            ConfigKey::Parallel => {
                candidate.engine.parallel = parse_bool(value).ok_or_else(|| invalid("true or false"))?;
            }
            ConfigKey::ParallelThreshold => {
                candidate.engine.parallel_threshold =
                    value.parse().map_err(|_| invalid("an integer"))?;
            }
        }

        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Restores the default for `key`.
    pub fn reset(&mut self, key: ConfigKey) {
        let defaults = Self::default();
        match key {
            ConfigKey::Format => self.output.format = defaults.output.format,
            ConfigKey::Precision => self.output.precision = defaults.output.precision,
            ConfigKey::Colors => self.output.colors = defaults.output.colors,
            ConfigKey::CurveYieldRange => {
                self.engine.curve_yield_range = defaults.engine.curve_yield_range;
            }
            ConfigKey::CurveSteps => self.engine.curve_steps = defaults.engine.curve_steps,
            ConfigKey::KeyRateBump => self.engine.key_rate_bump = defaults.engine.key_rate_bump,
            ConfigKey::EffectiveBump => {
                self.engine.effective_bump = defaults.engine.effective_bump;
            }
            ConfigKey::ImmunizationTolerance => {
                self.engine.immunization_tolerance = defaults.engine.immunization_tolerance;
            }
            ConfigKey::Parallel => self.engine.parallel = defaults.engine.parallel,
            ConfigKey::ParallelThreshold => {
                self.engine.parallel_threshold = defaults.engine.parallel_threshold;
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Resolves the configuration file: explicit path, else the user config dir.
pub fn config_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
    Ok(base.join("tenor").join("config.toml"))
}

/// Configuration keys accepted by `tenor config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    Format,
    /// Decimal places for output
    Precision,
    /// Whether to use colors
    Colors,
    /// Price-yield curve half-width
    CurveYieldRange,
    /// Price-yield curve intervals
    CurveSteps,
    /// Key rate duration bump
    KeyRateBump,
    /// Effective duration bump
    EffectiveBump,
    /// Immunization tolerance
    ImmunizationTolerance,
    /// Parallel batch processing
    Parallel,
    /// Parallel batch threshold
    ParallelThreshold,
}

impl ConfigKey {
    /// Parses a key name, accepting the short aliases.
    pub fn parse(s: &str) -> CliResult<Self> {
        let key = match s.to_lowercase().replace('-', "_").as_str() {
            "format" | "output.format" => Self::Format,
            "precision" | "output.precision" => Self::Precision,
            "colors" | "output.colors" => Self::Colors,
            "curve_yield_range" | "engine.curve_yield_range" => Self::CurveYieldRange,
            "curve_steps" | "engine.curve_steps" => Self::CurveSteps,
            "key_rate_bump" | "engine.key_rate_bump" => Self::KeyRateBump,
            "effective_bump" | "engine.effective_bump" => Self::EffectiveBump,
            "immunization_tolerance" | "engine.immunization_tolerance" => {
                Self::ImmunizationTolerance
            }
            "parallel" | "engine.parallel" => Self::Parallel,
            "parallel_threshold" | "engine.parallel_threshold" => Self::ParallelThreshold,
            _ => return Err(CliError::UnknownKey(s.to_string())),
        };
        Ok(key)
    }

    /// Canonical key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "output.format",
            Self::Precision => "output.precision",
            Self::Colors => "output.colors",
            Self::CurveYieldRange => "engine.curve_yield_range",
            Self::CurveSteps => "engine.curve_steps",
            Self::KeyRateBump => "engine.key_rate_bump",
            Self::EffectiveBump => "engine.effective_bump",
            Self::ImmunizationTolerance => "engine.immunization_tolerance",
            Self::Parallel => "engine.parallel",
            Self::ParallelThreshold => "engine.parallel_threshold",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Format => "Default output format (table, json, csv, minimal)",
            Self::Precision => "Decimal places for durations and convexity (2-10)",
            Self::Colors => "Enable colored output (true, false)",
            Self::CurveYieldRange => "Price-yield curve half-width as a decimal",
            Self::CurveSteps => "Price-yield curve intervals",
            Self::KeyRateBump => "Key rate duration bump as a decimal",
            Self::EffectiveBump => "Effective duration and convexity bump as a decimal",
            Self::ImmunizationTolerance => "Largest duration gap treated as immunized (years)",
            Self::Parallel => "Parallelise large batches (true, false)",
            Self::ParallelThreshold => "Batch size that triggers parallel processing",
        }
    }

    /// All keys in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Format,
            Self::Precision,
            Self::Colors,
            Self::CurveYieldRange,
            Self::CurveSteps,
            Self::KeyRateBump,
            Self::EffectiveBump,
            Self::ImmunizationTolerance,
            Self::Parallel,
            Self::ParallelThreshold,
        ]
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.set(ConfigKey::Format, "json").unwrap();
        settings.set(ConfigKey::CurveSteps, "20").unwrap();
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.engine.curve_steps, 20);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\nkey_rate_bump = 0.0002\n").unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.engine.key_rate_bump, 0.0002);
        assert_eq!(loaded.engine.curve_steps, 50);
        assert_eq!(loaded.output, OutputSettings::default());
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\ncurve_steps = 0\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(CliError::Config(_))));

        std::fs::write(&path, "not toml = = =").unwrap();
        assert!(matches!(Settings::load(&path), Err(CliError::Input { .. })));
    }

    #[test]
    fn test_unchecked_load_allows_repair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\ncurve_steps = 0\nkey_rate_bump = 0.0002\n").unwrap();

        let mut settings = Settings::load_unchecked(&path).unwrap();
        assert_eq!(settings.engine.curve_steps, 0);
        assert!(settings.validate().is_err());

        // Other keys stay blocked until the bad value is fixed
        assert!(settings.set(ConfigKey::Precision, "6").is_err());
        settings.set(ConfigKey::CurveSteps, "25").unwrap();
        settings.save(&path).unwrap();

        let repaired = Settings::load(&path).unwrap();
        assert_eq!(repaired.engine.curve_steps, 25);
        assert_eq!(repaired.engine.key_rate_bump, 0.0002);
    }

    #[test]
    fn test_set_validates() {
        let mut settings = Settings::default();
        assert!(settings.set(ConfigKey::Precision, "12").is_err());
        assert!(settings.set(ConfigKey::Colors, "maybe").is_err());
        assert!(settings.set(ConfigKey::KeyRateBump, "0").is_err());
        assert_eq!(settings, Settings::default());
        assert!(settings.set(ConfigKey::Parallel, "off").is_ok());
        assert!(!settings.engine.parallel);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut settings = Settings::default();
        settings.set(ConfigKey::EffectiveBump, "0.005").unwrap();
        settings.reset(ConfigKey::EffectiveBump);
        assert_eq!(settings.engine.effective_bump, 0.01);
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!(ConfigKey::parse("format").unwrap(), ConfigKey::Format);
        assert_eq!(ConfigKey::parse("engine.curve-steps").unwrap(), ConfigKey::CurveSteps);
        assert!(matches!(ConfigKey::parse("currency"), Err(CliError::UnknownKey(_))));
        for key in ConfigKey::all() {
            assert_eq!(ConfigKey::parse(key.as_str()).unwrap(), *key);
        }
    }
}
