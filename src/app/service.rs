//! Irrigation service: the hexagonal core of the Controls panel.
//!
//! [`IrrigationService`] owns the session FSM and its context.  It
//! exposes a device-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the whole service testable with mock
//! adapters.
//!
//! ```text
//!   AppCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │   IrrigationService    │
//!   tick()     ──▶ │   FSM · SessionContext │ ──▶ ActuatorPort
//!                  └────────────────────────┘
//! ```
//!
//! Every intent and every tick ends the same way: device states are
//! mirrored to the [`ActuatorPort`] and a full [`SessionSnapshot`] is
//! emitted.

use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::display::format_countdown;
use crate::fsm::context::{DeviceId, DeviceStates, SessionContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::commands::AppCommand;
use super::events::{AppEvent, SessionSnapshot};
use super::ports::{ActuatorPort, EventSink};

// ───────────────────────────────────────────────────────────────
// IrrigationService
// ───────────────────────────────────────────────────────────────

/// One manual-irrigation session.  Created when the Controls view mounts,
/// dropped when it unmounts.
pub struct IrrigationService {
    fsm: Fsm,
    ctx: SessionContext,
}

impl IrrigationService {
    /// Construct a session from configuration.
    ///
    /// Does **not** start the FSM: call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Self {
        let ctx = SessionContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);
        Self { fsm, ctx }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Idle and push the initial device states out.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_actuators(hw);
        sink.emit(&AppEvent::Mounted(self.snapshot()));
        info!("IrrigationService started in {:?}", self.fsm.current_state());
    }

    /// Discard the session: any countdown is cancelled and every device
    /// is switched off.
    pub fn shutdown(mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if self.is_running() {
            info!(
                "IrrigationService: unmounted with {}s left, cancelling",
                self.ctx.remaining_secs
            );
            self.fsm.force_transition(StateId::Idle, &mut self.ctx);
        }
        hw.all_off();
        sink.emit(&AppEvent::Unmounted);
    }

    // ── Countdown ─────────────────────────────────────────────

    /// One countdown second elapsed.  Ignored while idle.
    pub fn tick(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let prev_state = self.fsm.current_state();
        if prev_state != StateId::Running {
            debug!("IrrigationService: tick while idle ignored");
            return;
        }

        self.fsm.tick(&mut self.ctx);
        self.apply_actuators(hw);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
            sink.emit(&AppEvent::CountdownFinished);
        }
        sink.emit(&AppEvent::SessionUpdated(self.snapshot()));
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one user intent.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let prev_state = self.fsm.current_state();
        let running = prev_state == StateId::Running;

        match cmd {
            AppCommand::Start => {
                if running {
                    debug!("Start ignored: already running");
                } else {
                    info!("Start: {} min", self.ctx.requested_duration_minutes);
                    self.fsm.force_transition(StateId::Running, &mut self.ctx);
                }
            }
            AppCommand::Stop => {
                if running {
                    info!("Stop: {}s left", self.ctx.remaining_secs);
                    self.fsm.force_transition(StateId::Idle, &mut self.ctx);
                } else {
                    debug!("Stop ignored: not running");
                }
            }
            AppCommand::AdjustDuration(delta) => {
                if running {
                    debug!("AdjustDuration ignored while running");
                } else {
                    let current = i32::from(self.ctx.requested_duration_minutes);
                    self.ctx.set_requested_duration(current.saturating_add(delta));
                    info!("Duration: {} min", self.ctx.requested_duration_minutes);
                }
            }
            AppCommand::SetDuration(minutes) => {
                if running {
                    debug!("SetDuration ignored while running");
                } else {
                    self.ctx.set_requested_duration(minutes);
                    info!("Duration: {} min", self.ctx.requested_duration_minutes);
                }
            }
            AppCommand::ToggleDevice(id) => self.toggle_device(id, running),
            AppCommand::EmergencyStop => {
                warn!("EMERGENCY STOP");
                self.fsm.force_transition(StateId::Idle, &mut self.ctx);
                self.ctx.devices = DeviceStates::all_off();
                self.ctx.remaining_secs = 0;
                sink.emit(&AppEvent::EmergencyStop);
            }
            AppCommand::SetMode(mode) => {
                info!("Mode: {}", mode);
                self.ctx.mode = mode;
            }
        }

        self.apply_actuators(hw);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
        sink.emit(&AppEvent::SessionUpdated(self.snapshot()));
    }

    /// Flip a device.  Switching the pump off during a countdown takes the
    /// same path as `Stop`, so the countdown can never outlive the pump.
    fn toggle_device(&mut self, id: DeviceId, running: bool) {
        let next = !self.ctx.devices.get(id);
        if id == DeviceId::Pump && !next && running {
            info!("Toggle pump off while running: stopping session");
            self.fsm.force_transition(StateId::Idle, &mut self.ctx);
        } else {
            self.ctx.devices.set(id, next);
            info!("Toggle {}: {}", id, if next { "on" } else { "off" });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Full snapshot for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.fsm.current_state();
        SessionSnapshot {
            state,
            mode: self.ctx.mode,
            devices: self.ctx.devices,
            requested_duration_minutes: self.ctx.requested_duration_minutes,
            is_running: state == StateId::Running,
            remaining_secs: self.ctx.remaining_secs,
            countdown: format_countdown(self.ctx.remaining_secs),
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Whether a countdown is active (the tick timer must be armed).
    pub fn is_running(&self) -> bool {
        self.fsm.current_state() == StateId::Running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.ctx.remaining_secs
    }

    pub fn devices(&self) -> DeviceStates {
        self.ctx.devices
    }

    // ── Internal ──────────────────────────────────────────────

    /// Mirror the session's device states onto the actuators, writing
    /// only the devices that differ.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        for id in DeviceId::ALL {
            let want = self.ctx.devices.get(id);
            if hw.is_on(id) != want {
                hw.set_device(id, want);
            }
        }
    }
}
