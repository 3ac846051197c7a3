//! Serializable scan configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use swingscan_core::domain::Timeframe;
use swingscan_core::structure::{ClassifyMode, SwingConfig};
use thiserror::Error;

/// Bitget caps the candle endpoint at 1000 rows per request.
const MAX_BAR_LIMIT: usize = 1000;

/// Configuration for a single scan run.
///
/// Loadable from TOML; every field has a default, so an empty file is a
/// valid config (scan 1h/4h/1d across the whole catalog).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Timeframes to scan, in scan order.
    pub timeframes: Vec<Timeframe>,

    /// Explicit symbol whitelist. None scans the full instrument catalog.
    pub symbols: Option<Vec<String>>,

    /// Bars requested per (symbol, timeframe) pair.
    pub bar_limit: usize,

    /// Pairs with fewer bars than this are skipped without a row.
    pub min_bars: usize,

    /// Classifier variant.
    pub mode: ClassifyMode,

    /// Delay between data-source calls in milliseconds (sequential mode).
    pub pace_ms: u64,

    /// Fan fetches out over a worker pool instead of pacing sequentially.
    pub parallel: bool,

    /// Swing detection offsets.
    pub swing: SwingConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeframes: Timeframe::default_scan_set(),
            symbols: None,
            bar_limit: 100,
            min_bars: 20,
            mode: ClassifyMode::default(),
            pace_ms: 300,
            parallel: false,
            swing: SwingConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ScanConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Structural checks beyond what serde enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeframes.is_empty() {
            return Err(ConfigError::Invalid("timeframes must not be empty".into()));
        }
        if self.min_bars == 0 {
            return Err(ConfigError::Invalid("min_bars must be at least 1".into()));
        }
        if self.bar_limit < self.min_bars {
            return Err(ConfigError::Invalid(format!(
                "bar_limit ({}) below min_bars ({})",
                self.bar_limit, self.min_bars
            )));
        }
        if self.bar_limit > MAX_BAR_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "bar_limit ({}) exceeds provider maximum ({MAX_BAR_LIMIT})",
                self.bar_limit
            )));
        }
        if let Some(symbols) = &self.symbols {
            if symbols.is_empty() {
                return Err(ConfigError::Invalid(
                    "symbols whitelist present but empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Deterministic content hash for this configuration.
    ///
    /// Two scans with identical configs share a scan id; used to name
    /// exported artifacts.
    pub fn scan_id(&self) -> String {
        let json = serde_json::to_string(self).expect("ScanConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
