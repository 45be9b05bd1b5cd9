//! Outbound application events.
//!
//! The [`IrrigationService`](super::service::IrrigationService) and the
//! [`DashboardShell`](super::shell::DashboardShell) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them, draw a panel, print JSON.

use serde::Serialize;

use crate::error::Error;
use crate::fsm::context::{DeviceStates, Mode};
use crate::fsm::StateId;
use crate::navigation::AppView;
use crate::scheduler::{Schedule, ScheduleDraft};
use crate::sensors::{ChartPoint, SensorSnapshot, TimeRange};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A Controls session was created (carries its initial snapshot).
    Mounted(SessionSnapshot),

    /// The Controls session was discarded.
    Unmounted,

    /// The session FSM moved between states.
    StateChanged { from: StateId, to: StateId },

    /// Full session snapshot after a transition.
    SessionUpdated(SessionSnapshot),

    /// A countdown ran to zero on its own.
    CountdownFinished,

    /// Emergency stop forced every device off.
    EmergencyStop,

    /// The active view changed.
    ViewChanged { from: AppView, to: AppView },

    /// The active view should be drawn from this model.
    Rendered(ViewModel),

    /// An inbound event was refused.
    Rejected(Error),
}

/// Everything the presentation layer needs to draw the Controls panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: StateId,
    pub mode: Mode,
    pub devices: DeviceStates,
    pub requested_duration_minutes: u16,
    pub is_running: bool,
    pub remaining_secs: u32,
    /// `remaining_secs` as `M:SS`.
    pub countdown: heapless::String<16>,
}

/// Data for one screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    Dashboard {
        sensors: SensorSnapshot,
    },
    Analytics {
        range: TimeRange,
        series: &'static [ChartPoint],
        sensors: SensorSnapshot,
    },
    Controls {
        session: SessionSnapshot,
        sensors: SensorSnapshot,
    },
    Scheduling {
        draft: ScheduleDraft,
        schedules: Vec<Schedule>,
    },
}
