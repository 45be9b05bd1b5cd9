//! Mock field adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching a relay board.

use agromatrix::app::events::AppEvent;
use agromatrix::app::ports::{ActuatorPort, EventSink, SensorPort};
use agromatrix::fsm::context::{DeviceId, DeviceStates};
use agromatrix::sensors::{FIELD_READINGS, SensorSnapshot};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Set { id: DeviceId, on: bool },
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    relays: DeviceStates,
    pub reads: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            relays: DeviceStates::all_off(),
            reads: 0,
        }
    }

    pub fn relays(&self) -> DeviceStates {
        self.relays
    }

    pub fn pump_on(&self) -> bool {
        self.relays.pump
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockHardware {
    fn set_device(&mut self, id: DeviceId, on: bool) {
        self.calls.push(ActuatorCall::Set { id, on });
        self.relays.set(id, on);
    }

    fn is_on(&self, id: DeviceId) -> bool {
        self.relays.get(id)
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
        self.relays = DeviceStates::all_off();
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.reads += 1;
        FIELD_READINGS
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
