//! Integration tests for view navigation and the mount/unmount lifecycle.

use super::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use agromatrix::app::commands::{AppCommand, ScheduleCommand};
use agromatrix::app::events::{AppEvent, ViewModel};
use agromatrix::app::shell::DashboardShell;
use agromatrix::config::ControllerConfig;
use agromatrix::error::{Error, ScheduleError};
use agromatrix::events::Event;
use agromatrix::fsm::context::DeviceStates;
use agromatrix::navigation::AppView;
use agromatrix::scheduler::{Day, MAX_SCHEDULES};
use agromatrix::sensors::TimeRange;

fn make_shell() -> (DashboardShell, MockHardware, RecordingSink) {
    (
        DashboardShell::new(ControllerConfig::default()),
        MockHardware::new(),
        RecordingSink::new(),
    )
}

fn send(shell: &mut DashboardShell, hw: &mut MockHardware, sink: &mut RecordingSink, event: Event) {
    shell
        .dispatch(event, hw, sink)
        .unwrap_or_else(|e| panic!("{:?} rejected: {}", event, e));
}

#[test]
fn starts_on_dashboard_with_bottom_nav() {
    let (mut shell, mut hw, mut sink) = make_shell();
    assert_eq!(shell.current_view(), AppView::Dashboard);
    assert!(shell.bottom_nav_visible());
    send(&mut shell, &mut hw, &mut sink, Event::Show);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::Rendered(ViewModel::Dashboard { .. }))
    ));
}

#[test]
fn entering_controls_mounts_fresh_session() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Controls));

    assert!(shell.session().is_some());
    assert_eq!(hw.relays(), DeviceStates::default());
    assert!(sink.events.contains(&AppEvent::ViewChanged {
        from: AppView::Dashboard,
        to: AppView::Controls
    }));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Mounted(_))), 1);
}

#[test]
fn unmount_mid_countdown_switches_everything_off() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Controls));
    send(&mut shell, &mut hw, &mut sink, Event::Control(AppCommand::Start));
    for _ in 0..5 {
        shell.tick(&mut hw, &mut sink);
    }
    assert!(shell.countdown_active());

    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Scheduling));

    assert!(!shell.countdown_active());
    assert!(shell.session().is_none());
    assert_eq!(hw.last_call(), Some(&ActuatorCall::AllOff));
    assert!(sink.events.contains(&AppEvent::Unmounted));

    // A late tick after unmount reaches nobody.
    let before = sink.events.len();
    shell.tick(&mut hw, &mut sink);
    assert_eq!(sink.events.len(), before);
}

#[test]
fn control_intents_rejected_off_controls() {
    let (mut shell, mut hw, mut sink) = make_shell();
    for cmd in [AppCommand::Start, AppCommand::EmergencyStop, AppCommand::AdjustDuration(5)] {
        let result = shell.dispatch(Event::Control(cmd), &mut hw, &mut sink);
        assert_eq!(result, Err(Error::ViewInactive(AppView::Controls)));
    }
    assert!(hw.calls.is_empty());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Rejected(_))), 3);
}

#[test]
fn back_from_sub_pages_only() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Analytics));
    send(&mut shell, &mut hw, &mut sink, Event::Back);
    assert_eq!(shell.current_view(), AppView::Dashboard);

    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Controls));
    send(&mut shell, &mut hw, &mut sink, Event::Back);
    assert_eq!(shell.current_view(), AppView::Controls);
    assert!(shell.session().is_some());
}

#[test]
fn analytics_range_only_changes_label() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Analytics));
    send(&mut shell, &mut hw, &mut sink, Event::SelectRange(TimeRange::Week));
    match sink.events.last() {
        Some(AppEvent::Rendered(ViewModel::Analytics { range, series, .. })) => {
            assert_eq!(*range, TimeRange::Week);
            assert_eq!(series.len(), 8);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn schedule_editing_round() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Scheduling));
    assert!(!shell.bottom_nav_visible());
    assert_eq!(shell.schedules().len(), 3);

    send(&mut shell, &mut hw, &mut sink, Event::Schedule(ScheduleCommand::ToggleActive(2)));
    assert_eq!(shell.schedules().active_count(), 3);

    send(&mut shell, &mut hw, &mut sink, Event::Schedule(ScheduleCommand::Save));
    assert_eq!(shell.schedules().len(), 4);

    send(&mut shell, &mut hw, &mut sink, Event::Schedule(ScheduleCommand::Remove(1)));
    assert_eq!(shell.schedules().len(), 3);
    assert!(shell.schedules().get(1).is_none());
}

#[test]
fn saving_draft_without_days_is_rejected() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Scheduling));
    for day in [Day::Mon, Day::Wed, Day::Fri] {
        send(&mut shell, &mut hw, &mut sink, Event::Schedule(ScheduleCommand::ToggleDay(day)));
    }
    let result = shell.dispatch(Event::Schedule(ScheduleCommand::Save), &mut hw, &mut sink);
    assert_eq!(result, Err(Error::Schedule(ScheduleError::NoDaysSelected)));
    assert_eq!(shell.schedules().len(), 3);
}

#[test]
fn schedule_book_has_fixed_capacity() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Scheduling));
    while shell.schedules().len() < MAX_SCHEDULES {
        send(&mut shell, &mut hw, &mut sink, Event::Schedule(ScheduleCommand::Save));
    }
    let result = shell.dispatch(Event::Schedule(ScheduleCommand::Save), &mut hw, &mut sink);
    assert_eq!(result, Err(Error::Schedule(ScheduleError::Full)));
}

#[test]
fn schedules_survive_navigation() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Scheduling));
    send(&mut shell, &mut hw, &mut sink, Event::Schedule(ScheduleCommand::Save));
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Controls));
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Scheduling));
    assert_eq!(shell.schedules().len(), 4);
}

#[test]
fn quit_unmounts_session() {
    let (mut shell, mut hw, mut sink) = make_shell();
    send(&mut shell, &mut hw, &mut sink, Event::Navigate(AppView::Controls));
    send(&mut shell, &mut hw, &mut sink, Event::Control(AppCommand::Start));
    send(&mut shell, &mut hw, &mut sink, Event::Quit);
    assert!(shell.session().is_none());
    assert_eq!(hw.relays(), DeviceStates::all_off());
}
