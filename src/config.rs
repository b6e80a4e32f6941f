//! Configuration for the crossing counter core.
//!
//! ## Choosing a detection mode
//!
//! `symmetric` counts a crossing only on a strict flip of the hands'
//! vertical order between consecutive samples, the conservative choice.
//! `asymmetric` also fires when a hand falls below the other from a tie
//! and bootstraps from the first visible pair; it deliberately trades
//! precision for sensitivity and suits the playful rate metric:
//!
//! ```
//! use crisscross::config::{CounterConfig, DetectionMode};
//!
//! let mut config = CounterConfig::default();
//! config.detector.mode = DetectionMode::Asymmetric;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{DEFAULT_COOLDOWN_SECS, DEFAULT_HISTORY_LENGTH, DEFAULT_MIN_SEPARATION};
use crate::error::{CounterError, Result};

/// Cooldown interval between accepted crossings
///
/// Can be given as seconds or milliseconds. Useful on the command line
/// where sub-second debounce windows read better with a unit.
///
/// # Parsing formats
/// - `0.08` - seconds (no suffix)
/// - `0.08s` - seconds (explicit)
/// - `80ms` - milliseconds
///
/// # Example
/// ```
/// use crisscross::config::CooldownInterval;
///
/// let cooldown: CooldownInterval = "80ms".parse().unwrap();
/// assert!((cooldown.as_secs_f64() - 0.08).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CooldownInterval(f64);

impl CooldownInterval {
    /// Create from a duration in seconds
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Create from a duration in milliseconds
    pub fn from_millis(ms: f64) -> Self {
        Self(ms / 1000.0)
    }

    /// Get the interval in seconds
    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }
}

impl Default for CooldownInterval {
    fn default() -> Self {
        Self(DEFAULT_COOLDOWN_SECS)
    }
}

impl fmt::Display for CooldownInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

impl FromStr for CooldownInterval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(num) = s.strip_suffix("ms") {
            let ms: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid cooldown: {}", s))?;
            if ms < 0.0 {
                return Err("cooldown must not be negative".to_string());
            }
            return Ok(Self::from_millis(ms));
        }

        let num = s.strip_suffix('s').unwrap_or(s);
        let secs: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid cooldown: {}", s))?;
        if secs < 0.0 {
            return Err("cooldown must not be negative".to_string());
        }
        Ok(Self::from_secs(secs))
    }
}

/// Crossing comparison mode
///
/// Selects how the detector compares the current vertical order of the
/// hands against the previous sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Strict sign flip of the order between consecutive samples
    /// (lower false-positive rate)
    Symmetric,
    /// Any fall from "at or above" to "strictly below", bootstrapping from
    /// the first visible pair (higher sensitivity, may double-count)
    Asymmetric,
}

/// Position aggregation policy applied before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingMode {
    /// Use each frame's reading as-is
    Latest,
    /// Use the mean of the retained history buffer per hand
    Average,
}

/// Crossing detector configuration
///
/// Thresholds are validated when a session is constructed; negative values
/// are configuration errors, not runtime conditions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Comparison mode (see [`DetectionMode`])
    pub mode: DetectionMode,
    /// Minimum vertical separation (normalized coordinates, must be > 0)
    /// below which the hands count as indistinguishable
    pub min_separation: f32,
    /// Minimum seconds between accepted crossings (must be >= 0)
    pub cooldown_seconds: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::Symmetric,
            min_separation: DEFAULT_MIN_SEPARATION,
            cooldown_seconds: DEFAULT_COOLDOWN_SECS,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_separation.is_finite() || self.min_separation <= 0.0 {
            return Err(CounterError::Config(format!(
                "min_separation must be a positive number, got {}",
                self.min_separation
            )));
        }
        if !self.cooldown_seconds.is_finite() || self.cooldown_seconds < 0.0 {
            return Err(CounterError::Config(format!(
                "cooldown_seconds must not be negative, got {}",
                self.cooldown_seconds
            )));
        }
        Ok(())
    }
}

/// Position history configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of recent readings retained per hand (must be >= 1)
    pub length: usize,
    /// Aggregation applied to the retained readings (see [`SmoothingMode`])
    pub smoothing: SmoothingMode,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_HISTORY_LENGTH,
            smoothing: SmoothingMode::Latest,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(CounterError::Config(
                "history length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counter-wide configuration
///
/// Use `CounterConfig::default()` for the original tracker tuning. All
/// fields deserialize from TOML with per-field defaults, so override files
/// only need the keys they change:
///
/// ```toml
/// [detector]
/// mode = "asymmetric"
/// cooldown_seconds = 0.08
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Crossing detector thresholds and mode
    pub detector: DetectorConfig,
    /// Per-hand position history
    pub history: HistoryConfig,
    /// Name to record finished sessions under
    pub username: Option<String>,
}

impl CounterConfig {
    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        self.history.validate()
    }
}
