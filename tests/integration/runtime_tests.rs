//! Controller loop tests: real executor, real reactor timers, short periods.

use std::time::Duration;

use super::mock_hw::{MockHardware, RecordingSink};

use agromatrix::app::commands::AppCommand;
use agromatrix::app::events::AppEvent;
use agromatrix::app::ports::EventSink;
use agromatrix::app::shell::DashboardShell;
use agromatrix::config::ControllerConfig;
use agromatrix::events::{Event, EventChannel, push_event};
use agromatrix::fsm::context::DeviceStates;
use agromatrix::navigation::AppView;
use agromatrix::runtime::block_on_controller;

/// Records like [`RecordingSink`] and asks the loop to quit once the
/// countdown finishes.
struct QuitOnFinish<'a> {
    events: &'a EventChannel,
    inner: RecordingSink,
}

impl EventSink for QuitOnFinish<'_> {
    fn emit(&mut self, event: &AppEvent) {
        if *event == AppEvent::CountdownFinished {
            assert!(push_event(self.events, Event::Quit));
        }
        self.inner.emit(event);
    }
}

#[test]
fn countdown_runs_to_completion_on_reactor_timer() {
    let events = EventChannel::new();
    let config = ControllerConfig {
        default_duration_minutes: 1,
        ..ControllerConfig::default()
    };
    let mut shell = DashboardShell::new(config);
    let mut hw = MockHardware::new();
    let mut sink = QuitOnFinish {
        events: &events,
        inner: RecordingSink::new(),
    };

    assert!(push_event(&events, Event::Navigate(AppView::Controls)));
    assert!(push_event(&events, Event::Control(AppCommand::Start)));

    let stats = block_on_controller(&mut shell, &events, &mut hw, &mut sink, Duration::from_millis(1));

    assert_eq!(stats.ticks, 60);
    assert_eq!(stats.events, 3);
    assert_eq!(sink.inner.count(|e| *e == AppEvent::CountdownFinished), 1);
    assert_eq!(hw.relays(), DeviceStates::all_off());
    assert!(shell.session().is_none());
}

#[test]
fn stop_before_first_tick_cancels_timer() {
    let events = EventChannel::new();
    let mut shell = DashboardShell::new(ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for event in [
        Event::Navigate(AppView::Controls),
        Event::Control(AppCommand::Start),
        Event::Control(AppCommand::Stop),
        Event::Quit,
    ] {
        assert!(push_event(&events, event));
    }

    let stats = block_on_controller(&mut shell, &events, &mut hw, &mut sink, Duration::from_secs(10));

    assert_eq!(stats.ticks, 0);
    assert_eq!(stats.events, 4);
    assert!(!hw.pump_on());
}

#[test]
fn leaving_controls_drops_the_timer() {
    let events = EventChannel::new();
    let mut shell = DashboardShell::new(ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for event in [
        Event::Navigate(AppView::Controls),
        Event::Control(AppCommand::Start),
        Event::Navigate(AppView::Dashboard),
        Event::Quit,
    ] {
        assert!(push_event(&events, event));
    }

    let stats = block_on_controller(&mut shell, &events, &mut hw, &mut sink, Duration::from_secs(10));

    assert_eq!(stats.ticks, 0);
    assert_eq!(sink.count(|e| *e == AppEvent::Unmounted), 1);
    assert_eq!(hw.relays(), DeviceStates::all_off());
}

#[test]
fn rejected_events_do_not_stop_the_loop() {
    let events = EventChannel::new();
    let mut shell = DashboardShell::new(ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    assert!(push_event(&events, Event::Control(AppCommand::Start)));
    assert!(push_event(&events, Event::Show));
    assert!(push_event(&events, Event::Quit));

    let stats = block_on_controller(&mut shell, &events, &mut hw, &mut sink, Duration::from_millis(1));

    assert_eq!(stats.events, 3);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Rejected(_))), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Rendered(_))), 1);
}
