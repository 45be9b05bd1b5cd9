//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the binary routes it to a `tracing-subscriber`
//! formatter on stderr).

use log::{debug, info, warn};

use crate::app::events::{AppEvent, ViewModel};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one `TAG | ...` line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Mounted(s) => {
                info!(
                    "MOUNT | state={:?} | mode={} | duration={}min | pump={} mist={} lights={}",
                    s.state,
                    s.mode,
                    s.requested_duration_minutes,
                    on_off(s.devices.pump),
                    on_off(s.devices.mist),
                    on_off(s.devices.lights),
                );
            }
            AppEvent::Unmounted => {
                info!("UNMOUNT | session discarded, all devices off");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::SessionUpdated(s) => {
                // Fires every countdown second; keep it below info.
                debug!(
                    "SESSION | state={:?} | remaining={} | duration={}min | pump={} mist={} lights={}",
                    s.state,
                    s.countdown,
                    s.requested_duration_minutes,
                    on_off(s.devices.pump),
                    on_off(s.devices.mist),
                    on_off(s.devices.lights),
                );
            }
            AppEvent::CountdownFinished => {
                info!("DONE | countdown finished, pump off");
            }
            AppEvent::EmergencyStop => {
                warn!("ESTOP | all devices forced off");
            }
            AppEvent::ViewChanged { from, to } => {
                info!("VIEW | {} -> {}", from, to);
            }
            AppEvent::Rendered(model) => {
                debug!("RENDER | {}", view_name(model));
            }
            AppEvent::Rejected(e) => {
                warn!("REJECT | {}", e);
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

fn view_name(model: &ViewModel) -> &'static str {
    match model {
        ViewModel::Dashboard { .. } => "dashboard",
        ViewModel::Analytics { .. } => "analytics",
        ViewModel::Controls { .. } => "controls",
        ViewModel::Scheduling { .. } => "scheduling",
    }
}
