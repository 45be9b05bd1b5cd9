//! Dashboard shell: the view-level owner of everything the user sees.
//!
//! The shell holds the navigator, the schedule book and draft, the
//! analytics range and, only while the Controls view is active, one
//! [`IrrigationService`].  Leaving Controls drops that service, which
//! cancels its countdown.

use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::{Error, Result};
use crate::events::Event;
use crate::navigation::{AppView, Navigator};
use crate::scheduler::{ScheduleBook, ScheduleDraft};
use crate::sensors::{SERIES_24H, TimeRange};

use super::commands::{AppCommand, ScheduleCommand};
use super::events::{AppEvent, ViewModel};
use super::ports::{ActuatorPort, EventSink, SensorPort};
use super::service::IrrigationService;

pub struct DashboardShell {
    config: ControllerConfig,
    nav: Navigator,
    controls: Option<IrrigationService>,
    book: ScheduleBook,
    draft: ScheduleDraft,
    range: TimeRange,
}

impl DashboardShell {
    /// Start on the Dashboard with the sample schedules loaded.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            nav: Navigator::new(),
            controls: None,
            book: ScheduleBook::with_samples(),
            draft: ScheduleDraft::default(),
            range: TimeRange::default(),
        }
    }

    /// Process one inbound event.
    ///
    /// Refused events are reported to `sink` as [`AppEvent::Rejected`] and
    /// returned as `Err`; the shell state is left untouched.  Every
    /// accepted event ends with the active view being re-rendered.
    pub fn dispatch<H, S>(&mut self, event: Event, hw: &mut H, sink: &mut S) -> Result<()>
    where
        H: SensorPort + ActuatorPort,
        S: EventSink,
    {
        let result = match event {
            Event::Navigate(view) => {
                self.navigate(view, hw, sink);
                Ok(())
            }
            Event::Back => {
                if let Some(prev) = self.nav.back() {
                    self.on_view_changed(prev, hw, sink);
                }
                Ok(())
            }
            Event::Control(cmd) => self.control(cmd, hw, sink),
            Event::Schedule(cmd) => self.schedule(cmd),
            Event::SelectRange(range) => self.select_range(range),
            Event::Show => Ok(()),
            Event::Quit => {
                self.shutdown(hw, sink);
                return Ok(());
            }
        };

        match result {
            Ok(()) => {
                let model = self.view_model(hw);
                sink.emit(&AppEvent::Rendered(model));
                Ok(())
            }
            Err(e) => {
                warn!("SHELL | rejected {:?}: {}", event, e);
                sink.emit(&AppEvent::Rejected(e));
                Err(e)
            }
        }
    }

    /// One countdown period elapsed.  Only reaches the session while it runs.
    pub fn tick<H, S>(&mut self, hw: &mut H, sink: &mut S)
    where
        H: SensorPort + ActuatorPort,
        S: EventSink,
    {
        let Some(svc) = self.controls.as_mut() else {
            debug!("SHELL | tick without a session ignored");
            return;
        };
        svc.tick(hw, sink);
        let model = self.view_model(hw);
        sink.emit(&AppEvent::Rendered(model));
    }

    /// Unmount any session, leaving every actuator off.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if let Some(svc) = self.controls.take() {
            svc.shutdown(hw, sink);
        }
        info!("SHELL | shut down on {}", self.nav.current());
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the countdown timer must be armed.
    pub fn countdown_active(&self) -> bool {
        self.controls.as_ref().is_some_and(IrrigationService::is_running)
    }

    pub fn current_view(&self) -> AppView {
        self.nav.current()
    }

    pub fn bottom_nav_visible(&self) -> bool {
        self.nav.bottom_nav_visible()
    }

    /// The mounted session, if the Controls view is active.
    pub fn session(&self) -> Option<&IrrigationService> {
        self.controls.as_ref()
    }

    pub fn schedules(&self) -> &ScheduleBook {
        &self.book
    }

    pub fn draft(&self) -> &ScheduleDraft {
        &self.draft
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Assemble the data for the active view.
    pub fn view_model(&self, sensors: &mut impl SensorPort) -> ViewModel {
        let readings = sensors.read_all();
        match self.nav.current() {
            AppView::Dashboard => ViewModel::Dashboard { sensors: readings },
            AppView::Analytics => ViewModel::Analytics {
                range: self.range,
                series: &SERIES_24H,
                sensors: readings,
            },
            AppView::Controls => match &self.controls {
                Some(svc) => ViewModel::Controls {
                    session: svc.snapshot(),
                    sensors: readings,
                },
                // Controls is active only with a session mounted.
                None => ViewModel::Dashboard { sensors: readings },
            },
            AppView::Scheduling => ViewModel::Scheduling {
                draft: self.draft.clone(),
                schedules: self.book.iter().cloned().collect(),
            },
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn navigate<H, S>(&mut self, view: AppView, hw: &mut H, sink: &mut S)
    where
        H: ActuatorPort,
        S: EventSink,
    {
        if let Some(prev) = self.nav.navigate(view) {
            self.on_view_changed(prev, hw, sink);
        }
    }

    /// Unmount what was left, mount what was entered.
    fn on_view_changed(&mut self, prev: AppView, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let next = self.nav.current();

        if prev == AppView::Controls {
            if let Some(svc) = self.controls.take() {
                svc.shutdown(hw, sink);
            }
        }

        sink.emit(&AppEvent::ViewChanged { from: prev, to: next });

        match next {
            AppView::Controls => {
                let mut svc = IrrigationService::new(self.config.clone());
                svc.start(hw, sink);
                self.controls = Some(svc);
            }
            AppView::Scheduling => {
                self.draft = ScheduleDraft::default();
            }
            AppView::Dashboard | AppView::Analytics => {}
        }
    }

    fn control(&mut self, cmd: AppCommand, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> Result<()> {
        let svc = self
            .controls
            .as_mut()
            .ok_or(Error::ViewInactive(AppView::Controls))?;
        svc.handle_command(cmd, hw, sink);
        Ok(())
    }

    fn schedule(&mut self, cmd: ScheduleCommand) -> Result<()> {
        if self.nav.current() != AppView::Scheduling {
            return Err(Error::ViewInactive(AppView::Scheduling));
        }
        match cmd {
            ScheduleCommand::List => {}
            ScheduleCommand::ToggleActive(id) => {
                self.book.toggle_active(id)?;
            }
            ScheduleCommand::Remove(id) => {
                self.book.remove(id)?;
            }
            ScheduleCommand::CycleHour => self.draft.cycle_hour(),
            ScheduleCommand::CycleMinute => self.draft.cycle_minute(),
            ScheduleCommand::TogglePeriod => self.draft.toggle_period(),
            ScheduleCommand::AdjustDuration(delta) => self.draft.adjust_duration(delta),
            ScheduleCommand::ToggleDay(day) => self.draft.toggle_day(day),
            ScheduleCommand::Save => {
                self.book.add(&self.draft)?;
            }
        }
        Ok(())
    }

    fn select_range(&mut self, range: TimeRange) -> Result<()> {
        if self.nav.current() != AppView::Analytics {
            return Err(Error::ViewInactive(AppView::Analytics));
        }
        self.range = range;
        Ok(())
    }
}
