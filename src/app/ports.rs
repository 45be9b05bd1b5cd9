//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ IrrigationService / DashboardShell (domain)
//! ```
//!
//! Driven adapters (field sensors, device actuators, event sinks, config
//! storage) implement these traits.  The domain consumes them via
//! generics, so the core never touches a device directly.

use crate::config::ControllerConfig;
use crate::fsm::context::DeviceId;
use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: field → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain field readings.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → devices)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain mirrors its device states through this.
pub trait ActuatorPort {
    /// Switch one device on or off.
    fn set_device(&mut self, id: DeviceId, on: bool);

    /// Query the last state written to a device.
    fn is_on(&self, id: DeviceId) -> bool;

    /// Switch every device off: safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Fan an event out to two sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: config source → domain)
// ───────────────────────────────────────────────────────────────

/// Loads controller configuration.
///
/// Implementations validate before returning: out-of-range values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    /// Returns [`ControllerConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<ControllerConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config could not be parsed.
    Corrupted(serde_json::Error),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    Io(std::io::Error),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted(e) => write!(f, "config corrupted: {}", e),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Corrupted(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::ValidationFailed(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupted(e)
    }
}
