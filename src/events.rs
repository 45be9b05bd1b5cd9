//! Inbound event channel.
//!
//! Events are produced by:
//! - The console reader thread (one parsed line per event)
//! - Tests driving the controller directly
//!
//! Events are consumed by the controller loop, which processes them
//! one at a time in FIFO order, ahead of any pending countdown tick.
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ stdin lines │────▶│  EventChannel │────▶│  controller loop │
//! │ tests       │────▶│  (bounded)    │     │  (consumer)      │
//! └─────────────┘     └───────────────┘     └──────────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::commands::{AppCommand, ScheduleCommand};
use crate::navigation::AppView;
use crate::sensors::TimeRange;

/// Maximum number of pending events.
pub const EVENT_DEPTH: usize = 16;

/// Everything the controller loop can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // ── Navigation ────────────────────────────────────────
    /// Switch to a view.
    Navigate(AppView),
    /// Return from a sub-page to the Dashboard.
    Back,

    // ── View intents ──────────────────────────────────────
    /// Manual irrigation intent for the Controls view.
    Control(AppCommand),
    /// Schedule editor intent for the Scheduling view.
    Schedule(ScheduleCommand),
    /// Analytics time-range selector.
    SelectRange(TimeRange),

    // ── Housekeeping ──────────────────────────────────────
    /// Redraw the active view.
    Show,
    /// Tear everything down and leave the loop.
    Quit,
}

/// Bounded multi-producer channel feeding the controller loop.
pub type EventChannel = Channel<CriticalSectionRawMutex, Event, EVENT_DEPTH>;

/// Push an event without blocking.
/// Returns `false` if the channel is full (event dropped).
pub fn push_event(channel: &EventChannel, event: Event) -> bool {
    match channel.try_send(event) {
        Ok(()) => true,
        Err(_) => {
            warn!("EVENT | queue full, dropped {:?}", event);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_fails_once_full() {
        let channel = EventChannel::new();
        for _ in 0..EVENT_DEPTH {
            assert!(push_event(&channel, Event::Show));
        }
        assert!(!push_event(&channel, Event::Quit));
        assert_eq!(channel.try_receive(), Ok(Event::Show));
    }
}
