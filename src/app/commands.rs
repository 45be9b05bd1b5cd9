//! Inbound commands to the application core.
//!
//! [`AppCommand`] is the intent vocabulary of the manual-irrigation
//! session.  [`ScheduleCommand`] edits the schedule book and draft.  Both
//! travel inside [`Event`](crate::events::Event) from whatever adapter
//! produced them (console, tests).

use crate::fsm::context::{DeviceId, Mode};
use crate::scheduler::Day;

/// Intents accepted by the [`IrrigationService`](super::service::IrrigationService).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Begin a manual irrigation countdown.  Idle only.
    Start,

    /// Cancel the running countdown.  Running only.
    Stop,

    /// Shift the requested duration by a signed number of minutes.  Idle only.
    AdjustDuration(i32),

    /// Set the requested duration directly (slider).  Idle only.
    SetDuration(i32),

    /// Flip one device.  Switching the pump off while running stops the session.
    ToggleDevice(DeviceId),

    /// Force every device off and cancel any countdown.  Always accepted.
    EmergencyStop,

    /// Select the system mode.  Informational only.
    SetMode(Mode),
}

/// Edits on the Scheduling view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleCommand {
    /// Redraw the book and draft.
    List,
    /// Flip the enable switch of schedule `id`.
    ToggleActive(u32),
    /// Delete schedule `id`.
    Remove(u32),
    CycleHour,
    CycleMinute,
    TogglePeriod,
    /// Shift the draft duration by a signed number of minutes.
    AdjustDuration(i32),
    ToggleDay(Day),
    /// Append the draft to the book.
    Save,
}
