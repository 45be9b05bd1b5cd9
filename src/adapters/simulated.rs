//! Simulated field adapter.
//!
//! Stands in for the sensor bus and the relay board on a host: readings
//! are the fixed field values, and device writes land in an in-memory
//! relay image.  This is the only place the binary "touches" devices.

use log::info;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::fsm::context::{DeviceId, DeviceStates};
use crate::sensors::{FIELD_READINGS, SensorSnapshot};

/// Fixed sensors plus three in-memory relays, all off at power-up.
#[derive(Debug, Clone)]
pub struct SimulatedFarm {
    readings: SensorSnapshot,
    relays: DeviceStates,
    writes: u32,
}

impl Default for SimulatedFarm {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedFarm {
    pub fn new() -> Self {
        Self::with_readings(FIELD_READINGS)
    }

    pub fn with_readings(readings: SensorSnapshot) -> Self {
        Self {
            readings,
            relays: DeviceStates::all_off(),
            writes: 0,
        }
    }

    /// Current relay image.
    pub fn relays(&self) -> DeviceStates {
        self.relays
    }

    /// Number of relay writes since construction.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for SimulatedFarm {
    fn read_all(&mut self) -> SensorSnapshot {
        self.readings
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for SimulatedFarm {
    fn set_device(&mut self, id: DeviceId, on: bool) {
        self.relays.set(id, on);
        self.writes += 1;
        info!("RELAY | {} {}", id, if on { "ON" } else { "OFF" });
    }

    fn is_on(&self, id: DeviceId) -> bool {
        self.relays.get(id)
    }

    fn all_off(&mut self) {
        if self.relays.any_on() {
            info!("RELAY | all OFF");
        }
        self.relays = DeviceStates::all_off();
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relays_start_off_and_track_writes() {
        let mut farm = SimulatedFarm::new();
        assert!(!farm.relays().any_on());
        farm.set_device(DeviceId::Mist, true);
        assert!(farm.is_on(DeviceId::Mist));
        farm.all_off();
        assert!(!farm.relays().any_on());
        assert_eq!(farm.writes(), 2);
    }

    #[test]
    fn reads_field_values() {
        let mut farm = SimulatedFarm::new();
        assert_eq!(farm.read_all().soil_moisture_pct, 65);
    }
}
