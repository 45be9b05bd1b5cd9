//! Integration tests for the IrrigationService → FSM → actuators pipeline.

use super::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use agromatrix::app::commands::AppCommand;
use agromatrix::app::events::AppEvent;
use agromatrix::app::service::IrrigationService;
use agromatrix::config::ControllerConfig;
use agromatrix::display::format_countdown;
use agromatrix::fsm::StateId;
use agromatrix::fsm::context::{DeviceId, DeviceStates, Mode};

fn make_app() -> (IrrigationService, MockHardware, RecordingSink) {
    let mut app = IrrigationService::new(ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

// ── Full session ──────────────────────────────────────────────

#[test]
fn fifteen_minute_session_runs_to_completion() {
    let (mut app, mut hw, mut sink) = make_app();
    assert_eq!(app.snapshot().requested_duration_minutes, 15);

    app.handle_command(AppCommand::Start, &mut hw, &mut sink);
    assert_eq!(app.remaining_secs(), 900);
    assert!(hw.pump_on());

    for _ in 0..899 {
        app.tick(&mut hw, &mut sink);
        assert!(app.is_running());
        assert!(app.remaining_secs() > 0);
    }
    app.tick(&mut hw, &mut sink);

    let snap = app.snapshot();
    assert!(!snap.is_running);
    assert_eq!(snap.remaining_secs, 0);
    assert!(!snap.devices.pump);
    assert!(!hw.pump_on());
    assert_eq!(sink.count(|e| *e == AppEvent::CountdownFinished), 1);

    assert_eq!(format_countdown(75).as_str(), "1:15");
    assert_eq!(format_countdown(5).as_str(), "0:05");
}

#[test]
fn every_tick_emits_a_snapshot() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(AppCommand::SetDuration(1), &mut hw, &mut sink);
    app.handle_command(AppCommand::Start, &mut hw, &mut sink);
    sink.clear();

    for _ in 0..60 {
        app.tick(&mut hw, &mut sink);
    }
    let updates = sink.count(|e| matches!(e, AppEvent::SessionUpdated(_)));
    assert_eq!(updates, 60);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::StateChanged { to: StateId::Idle, .. })),
        1
    );
}

// ── Stop paths ────────────────────────────────────────────────

#[test]
fn stop_mid_countdown_clears_remaining() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(AppCommand::Start, &mut hw, &mut sink);
    for _ in 0..30 {
        app.tick(&mut hw, &mut sink);
    }
    app.handle_command(AppCommand::Stop, &mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(app.remaining_secs(), 0);
    assert!(!hw.pump_on());
    assert_eq!(sink.count(|e| *e == AppEvent::CountdownFinished), 0);
}

#[test]
fn pump_toggle_while_running_matches_stop() {
    let (mut a, mut hw_a, mut sink_a) = make_app();
    let (mut b, mut hw_b, mut sink_b) = make_app();
    for (app, hw, sink) in [(&mut a, &mut hw_a, &mut sink_a), (&mut b, &mut hw_b, &mut sink_b)] {
        app.handle_command(AppCommand::Start, hw, sink);
        for _ in 0..10 {
            app.tick(hw, sink);
        }
    }

    a.handle_command(AppCommand::Stop, &mut hw_a, &mut sink_a);
    b.handle_command(AppCommand::ToggleDevice(DeviceId::Pump), &mut hw_b, &mut sink_b);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(hw_a.relays(), hw_b.relays());
}

#[test]
fn pump_toggle_while_idle_only_flips_pump() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(AppCommand::ToggleDevice(DeviceId::Pump), &mut hw, &mut sink);
    assert!(hw.pump_on());
    assert!(!app.is_running());
    assert_eq!(
        hw.last_call(),
        Some(&ActuatorCall::Set { id: DeviceId::Pump, on: true })
    );
}

#[test]
fn emergency_stop_forces_everything_off() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(AppCommand::ToggleDevice(DeviceId::Lights), &mut hw, &mut sink);
    app.handle_command(AppCommand::Start, &mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    app.handle_command(AppCommand::EmergencyStop, &mut hw, &mut sink);

    assert_eq!(app.devices(), DeviceStates::all_off());
    assert_eq!(hw.relays(), DeviceStates::all_off());
    assert!(!app.is_running());
    assert_eq!(app.remaining_secs(), 0);
    assert_eq!(sink.count(|e| *e == AppEvent::EmergencyStop), 1);
}

// ── Idle-only edits ───────────────────────────────────────────

#[test]
fn duration_steps_clamp_to_range() {
    let (mut app, mut hw, mut sink) = make_app();
    for _ in 0..5 {
        app.handle_command(AppCommand::AdjustDuration(-5), &mut hw, &mut sink);
    }
    assert_eq!(app.snapshot().requested_duration_minutes, 1);
    for _ in 0..40 {
        app.handle_command(AppCommand::AdjustDuration(5), &mut hw, &mut sink);
    }
    assert_eq!(app.snapshot().requested_duration_minutes, 120);
}

#[test]
fn start_while_running_does_not_restart() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(AppCommand::Start, &mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    app.handle_command(AppCommand::Start, &mut hw, &mut sink);
    assert_eq!(app.remaining_secs(), 899);
}

#[test]
fn mode_is_informational() {
    let (mut app, mut hw, mut sink) = make_app();
    let calls = hw.calls.len();
    app.handle_command(AppCommand::SetMode(Mode::Auto), &mut hw, &mut sink);
    assert_eq!(app.snapshot().mode, Mode::Auto);
    assert_eq!(hw.calls.len(), calls, "mode change must not touch devices");
    assert!(!app.is_running());
}

#[test]
fn config_seeds_new_session() {
    let config = ControllerConfig {
        default_duration_minutes: 30,
        initial_devices: DeviceStates::all_off(),
        ..ControllerConfig::default()
    };
    let mut app = IrrigationService::new(config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    assert_eq!(app.snapshot().requested_duration_minutes, 30);
    assert!(hw.calls.is_empty());
}
