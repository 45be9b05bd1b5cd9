//! Controller configuration parameters
//!
//! All tunable parameters for the irrigation controller.
//! Values can be overridden from a JSON file (see
//! [`JsonConfigFile`](crate::adapters::config_file::JsonConfigFile)) or
//! command-line flags.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::fsm::context::{DeviceStates, Mode};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Manual irrigation ---
    /// Duration a new session starts with (minutes)
    pub default_duration_minutes: u16,
    /// Lower bound for the requested duration (minutes)
    pub min_duration_minutes: u16,
    /// Upper bound for the requested duration (minutes)
    pub max_duration_minutes: u16,
    /// Increment applied by the -/+ buttons (minutes)
    pub duration_step_minutes: u16,

    // --- Timing ---
    /// Countdown tick period (milliseconds).  One tick is one countdown second.
    pub countdown_interval_ms: u32,

    // --- Initial session state ---
    pub initial_mode: Mode,
    pub initial_devices: DeviceStates,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Manual irrigation
            default_duration_minutes: 15,
            min_duration_minutes: 1,
            max_duration_minutes: 120,
            duration_step_minutes: 5,

            // Timing
            countdown_interval_ms: 1000, // 1 Hz

            // Initial session state
            initial_mode: Mode::Manual,
            initial_devices: DeviceStates::default(),
        }
    }
}

impl ControllerConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_duration_minutes < 1 {
            return Err(ConfigError::ValidationFailed("min_duration_minutes must be at least 1"));
        }
        if self.max_duration_minutes < self.min_duration_minutes {
            return Err(ConfigError::ValidationFailed(
                "max_duration_minutes must not be below min_duration_minutes",
            ));
        }
        if self.default_duration_minutes < self.min_duration_minutes
            || self.default_duration_minutes > self.max_duration_minutes
        {
            return Err(ConfigError::ValidationFailed(
                "default_duration_minutes must lie within [min, max]",
            ));
        }
        if self.duration_step_minutes == 0 {
            return Err(ConfigError::ValidationFailed("duration_step_minutes must be non-zero"));
        }
        if self.countdown_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("countdown_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Clamp a requested duration into `[min, max]`.
    pub fn clamp_duration(&self, minutes: i32) -> u16 {
        minutes.clamp(
            i32::from(self.min_duration_minutes),
            i32::from(self.max_duration_minutes),
        ) as u16
    }
}
