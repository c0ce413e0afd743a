//! Analysis Configuration Module
//!
//! Provides tunable registry content and forecast settings loaded from a
//! TOML file, with complete built-in defaults for file-less runs.
//!
//! ## Loading Order
//!
//! 1. `SPARECAST_CONFIG` environment variable (path to TOML file)
//! 2. `sparecast.toml` in the current working directory
//! 3. Built-in defaults (the curated marine-inventory registries)
//!
//! The loaded `Config` is immutable and passed explicitly into the
//! classifier and forecaster — there is no process-global config state, so
//! tests and parallel batch runs stay isolated.

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One category registry entry. Declaration order in the file is preserved
/// and significant (first category with a keyword hit wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Registry content consulted by the pattern library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub brands: Vec<String>,
    pub categories: Vec<CategoryEntry>,
    pub part_number_blacklist: Vec<String>,
    pub units: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            brands: defaults::BRANDS.iter().map(|s| s.to_string()).collect(),
            categories: defaults::CATEGORIES
                .iter()
                .map(|(label, keywords)| CategoryEntry {
                    label: label.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
            part_number_blacklist: defaults::PART_NUMBER_BLACKLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            units: defaults::UNITS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Forecast tuning. Model orders are deliberately NOT configurable — the
/// fixed (1,1,1)x(1,0,1)@12 architecture lives as constants in
/// `crate::forecast` because behavior parity depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub min_history_months: usize,
    pub backtest_holdout_months: usize,
    pub interval_confidence: f64,
    pub max_horizon_months: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            min_history_months: defaults::MIN_HISTORY_MONTHS,
            backtest_holdout_months: defaults::BACKTEST_HOLDOUT_MONTHS,
            interval_confidence: defaults::INTERVAL_CONFIDENCE,
            max_horizon_months: defaults::MAX_HORIZON_MONTHS,
        }
    }
}

/// Top-level configuration, one instance per process, passed explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub forecast: ForecastSettings,
}

impl Config {
    /// Load configuration: env-var path, then `./sparecast.toml`, then
    /// built-in defaults. A file that exists but fails to parse falls back
    /// to defaults with a warning — a bad override should not brick the
    /// batch tools.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("SPARECAST_CONFIG") {
            return Self::load_from(Path::new(&path));
        }
        let local = Path::new("sparecast.toml");
        if local.exists() {
            return Self::load_from(local);
        }
        tracing::debug!("no sparecast.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file, falling back to defaults on error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read config, using defaults"
                );
                Self::default()
            }
        }
    }
}
