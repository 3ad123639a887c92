//! # Configuration Module
//!
//! This module handles all configurable settings for the parking lot.
//!
//! ## Plain English Explanation
//!
//! A car park has a few knobs you can turn before opening the gates:
//! - How many bays to start with
//! - How a highlighted bay blinks when you search for a car
//! - Whether "clear everything" asks for confirmation first
//!
//! Settings come from [`Config::default`], one of the presets, or a TOML
//! file loaded with [`Config::load`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LotResult;

/// Longest allowed gap between highlight pulses.
pub const MAX_PULSE_INTERVAL_MS: u64 = 5_000;

/// Most bays a lot may have, at opening or after a resize.
pub const MAX_CAPACITY: usize = 10_000;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// All configuration options for the parking lot.
///
/// Missing fields in a config file fall back to their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // ----------------------------------------
    // LOT SETTINGS
    // ----------------------------------------
    /// Number of bays when the lot opens
    ///
    /// Values below 4 are clamped to 4 when the lot is built; values above
    /// [`MAX_CAPACITY`] are rejected.
    pub initial_capacity: usize,

    // ----------------------------------------
    // HIGHLIGHT SETTINGS
    // "How a found car blinks"
    // ----------------------------------------
    /// How many times the outline toggles
    pub pulse_steps: u32,

    /// Delay between toggles in milliseconds
    pub pulse_interval_ms: u64,

    // ----------------------------------------
    // SAFETY SETTINGS
    // ----------------------------------------
    /// Ask before clearing every parked car
    pub confirm_clear: bool,
}

impl Config {
    /// A small lot: four bays.
    pub fn compact() -> Self {
        Self {
            initial_capacity: 4,
            ..Self::default()
        }
    }

    /// A big lot with a quicker blink.
    pub fn large() -> Self {
        Self {
            initial_capacity: 32,
            pulse_interval_ms: 120,
            ..Self::default()
        }
    }

    /// Reads a TOML config file and validates it.
    ///
    /// ## Example File
    /// ```toml
    /// initial_capacity = 12
    /// confirm_clear = false
    /// ```
    pub fn load(path: impl AsRef<Path>) -> LotResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        if let Some(err) = config.validate().into_iter().next() {
            return Err(err.into());
        }

        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.initial_capacity > MAX_CAPACITY {
            errors.push(ConfigError::CapacityTooLarge(self.initial_capacity));
        }

        if self.pulse_steps == 0 {
            errors.push(ConfigError::PulseStepsZero);
        }

        if self.pulse_interval_ms == 0 || self.pulse_interval_ms > MAX_PULSE_INTERVAL_MS {
            errors.push(ConfigError::InvalidPulseInterval(self.pulse_interval_ms));
        }

        errors
    }

    /// Delay between highlight toggles.
    pub fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 8,
            pulse_steps: 6,
            pulse_interval_ms: 180,
            confirm_clear: true,
        }
    }
}

// ============================================
// CONFIGURATION ERRORS
// ============================================

/// Errors that can occur with configuration values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// More bays than the lot will allocate
    #[error("capacity {0} exceeds the maximum of {max}", max = MAX_CAPACITY)]
    CapacityTooLarge(usize),

    /// A pulse with no steps never shows
    #[error("pulse_steps must be at least 1")]
    PulseStepsZero,

    /// Pulse interval is zero or too long to read as a blink
    #[error("pulse_interval_ms {0} is outside valid range (1-{max})", max = MAX_PULSE_INTERVAL_MS)]
    InvalidPulseInterval(u64),
}

// ============================================
// TESTS
// ============================================
