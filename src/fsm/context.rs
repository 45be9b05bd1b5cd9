//! Session state threaded through every FSM handler.
//!
//! `SessionContext` is the single struct that state handlers read from
//! and write to: the operating mode, the three simulated devices, the
//! requested irrigation duration and the live countdown.  It is the
//! "blackboard" of the manual-irrigation session and has exactly one
//! owner, the [`IrrigationService`](crate::app::service::IrrigationService).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ControllerConfig;
use crate::error::CommandError;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// System mode selected on the Controls panel.
///
/// Informational only: neither value gates or drives any transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Auto,
    Manual,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

impl FromStr for Mode {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            _ => Err(CommandError::UnknownMode),
        }
    }
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// The three simulated actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceId {
    Pump,
    Mist,
    Lights,
}

impl DeviceId {
    pub const ALL: [DeviceId; 3] = [DeviceId::Pump, DeviceId::Mist, DeviceId::Lights];

    /// Label shown on the device card.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pump => "Water Pump",
            Self::Mist => "Mist System",
            Self::Lights => "Grow Lights",
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pump => write!(f, "pump"),
            Self::Mist => write!(f, "mist"),
            Self::Lights => write!(f, "lights"),
        }
    }
}

impl FromStr for DeviceId {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pump" => Ok(Self::Pump),
            "mist" => Ok(Self::Mist),
            "lights" | "light" => Ok(Self::Lights),
            _ => Err(CommandError::UnknownDevice),
        }
    }
}

/// On/off state of every device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStates {
    pub pump: bool,
    pub mist: bool,
    pub lights: bool,
}

impl Default for DeviceStates {
    fn default() -> Self {
        Self {
            pump: false,
            mist: true,
            lights: false,
        }
    }
}

impl DeviceStates {
    /// Every device off: safe default.
    pub const fn all_off() -> Self {
        Self {
            pump: false,
            mist: false,
            lights: false,
        }
    }

    pub fn get(&self, id: DeviceId) -> bool {
        match id {
            DeviceId::Pump => self.pump,
            DeviceId::Mist => self.mist,
            DeviceId::Lights => self.lights,
        }
    }

    pub fn set(&mut self, id: DeviceId, on: bool) {
        match id {
            DeviceId::Pump => self.pump = on,
            DeviceId::Mist => self.mist = on,
            DeviceId::Lights => self.lights = on,
        }
    }

    /// Flip one device and return its new value.
    pub fn toggle(&mut self, id: DeviceId) -> bool {
        let next = !self.get(id);
        self.set(id, next);
        next
    }

    pub fn any_on(&self) -> bool {
        self.pump || self.mist || self.lights
    }
}

// ---------------------------------------------------------------------------
// SessionContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct SessionContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,

    // -- Session --
    pub mode: Mode,
    pub devices: DeviceStates,
    /// Duration that seeds the next countdown.  Clamped to the configured
    /// bounds on every write.
    pub requested_duration_minutes: u16,
    /// Seconds left on the running countdown; zero while idle.
    pub remaining_secs: u32,

    // -- Configuration --
    pub config: ControllerConfig,
}

impl SessionContext {
    /// Create a fresh session seeded from configuration.
    pub fn new(config: ControllerConfig) -> Self {
        let requested_duration_minutes = config.clamp_duration(i32::from(config.default_duration_minutes));
        Self {
            ticks_in_state: 0,
            mode: config.initial_mode,
            devices: config.initial_devices,
            requested_duration_minutes,
            remaining_secs: 0,
            config,
        }
    }

    /// Seconds a countdown started now would run for.
    pub fn requested_secs(&self) -> u32 {
        u32::from(self.requested_duration_minutes) * 60
    }

    /// Store a new requested duration, clamped to the configured range.
    pub fn set_requested_duration(&mut self, minutes: i32) {
        self.requested_duration_minutes = self.config.clamp_duration(minutes);
    }
}
