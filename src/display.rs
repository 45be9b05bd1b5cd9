//! Text rendering of the dashboard views.
//!
//! Pure functions from view models to fixed-width text panels.  The
//! console adapter prints them; tests compare them directly.

use core::fmt::Write as _;

use crate::app::events::{SessionSnapshot, ViewModel};
use crate::fsm::context::DeviceId;
use crate::navigation::{AppView, NAV_ITEMS};
use crate::scheduler::{Schedule, ScheduleDraft};
use crate::sensors::{ChartPoint, SensorSnapshot, TimeRange};

/// Width of the countdown progress bar in cells.
const PROGRESS_CELLS: usize = 20;

/// Render a countdown as `M:SS` (minutes unpadded).
pub fn format_countdown(secs: u32) -> heapless::String<16> {
    let mut s = heapless::String::new();
    let _ = write!(s, "{}:{:02}", secs / 60, secs % 60);
    s
}

/// Fraction of the session still to run, in `[0, 1]`.
pub fn progress(remaining_secs: u32, duration_minutes: u16) -> f32 {
    let total = u32::from(duration_minutes) * 60;
    if total == 0 {
        return 0.0;
    }
    (remaining_secs as f32 / total as f32).clamp(0.0, 1.0)
}

fn progress_bar(fraction: f32) -> String {
    let filled = (fraction * PROGRESS_CELLS as f32).round() as usize;
    let filled = filled.min(PROGRESS_CELLS);
    let mut bar = String::with_capacity(PROGRESS_CELLS + 2);
    bar.push('[');
    bar.extend(core::iter::repeat_n('#', filled));
    bar.extend(core::iter::repeat_n('.', PROGRESS_CELLS - filled));
    bar.push(']');
    bar
}

fn on_off(on: bool) -> &'static str {
    if on { "ON " } else { "OFF" }
}

/// Render whichever view the model describes, followed by the bottom
/// navigation bar where the view shows one.
pub fn render(model: &ViewModel) -> String {
    let (mut out, view) = match model {
        ViewModel::Dashboard { sensors } => (render_dashboard(sensors), AppView::Dashboard),
        ViewModel::Analytics { range, series, sensors } => {
            (render_analytics(*range, series, sensors), AppView::Analytics)
        }
        ViewModel::Controls { session, sensors } => (render_controls(session, sensors), AppView::Controls),
        ViewModel::Scheduling { draft, schedules } => (render_scheduling(draft, schedules), AppView::Scheduling),
    };
    if view != AppView::Scheduling {
        out.push_str(&render_bottom_nav(view));
    }
    out
}

pub fn render_dashboard(sensors: &SensorSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== LHU AgroMatrix ==  {}", sensors.location);
    let _ = writeln!(
        out,
        "Weather      {:.0}\u{00b0}C  {}",
        sensors.weather_temperature_c, sensors.weather_summary
    );
    let _ = writeln!(out, "Soil Moisture  {}%", sensors.soil_moisture_pct);
    let _ = writeln!(out, "Air Temp       {:.0}\u{00b0}C", sensors.air_temperature_c);
    let _ = writeln!(out, "Humidity       {}%", sensors.humidity_pct);
    let _ = writeln!(out, "[go controls] Start Irrigation");
    out
}

pub fn render_analytics(range: TimeRange, series: &[ChartPoint], sensors: &SensorSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Analytics ({range}) ==");
    let _ = writeln!(out, "Soil moisture  current: Optimal ({}%)", sensors.soil_moisture_pct);
    let _ = writeln!(out, "Temperature    current: {:.0}\u{00b0}C", sensors.controls_temperature_c);
    let _ = writeln!(out, "time   moisture  temp");
    for p in series {
        let _ = writeln!(out, "{}  {:>6}%  {:>3}\u{00b0}C", p.time, p.moisture_pct, p.temperature_c);
    }
    out
}

pub fn render_controls(session: &SessionSnapshot, sensors: &SensorSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Control Center ==");
    let _ = writeln!(
        out,
        "Soil Moisture {}%   Temperature {:.0}\u{00b0}C",
        sensors.soil_moisture_pct, sensors.controls_temperature_c
    );
    let _ = writeln!(out, "System Mode: {}", session.mode);

    if session.is_running {
        let _ = writeln!(
            out,
            "Manual Irrigation  RUNNING  {} remaining {}",
            session.countdown,
            progress_bar(progress(session.remaining_secs, session.requested_duration_minutes))
        );
    } else {
        let _ = writeln!(
            out,
            "Manual Irrigation  duration {} min  [start]",
            session.requested_duration_minutes
        );
    }

    for id in DeviceId::ALL {
        let note = match id {
            DeviceId::Pump if session.is_running => "Running (Manual Override)",
            DeviceId::Pump => "Irrigation Line A",
            DeviceId::Mist => "Humidity Control",
            DeviceId::Lights => "Zone 1 & 2",
        };
        let _ = writeln!(out, "  {:<12} {}  {}", id.label(), on_off(session.devices.get(id)), note);
    }
    let _ = writeln!(out, "[estop] Emergency Stop");
    out
}

pub fn render_scheduling(draft: &ScheduleDraft, schedules: &[Schedule]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Smart Scheduling ==");
    let _ = writeln!(out, "New: {}", draft.summary());
    let _ = writeln!(out, "Upcoming:");
    for s in schedules {
        let _ = writeln!(
            out,
            "  #{:<2} {}  {:<9} {:>3} min  {}",
            s.id,
            s.time,
            s.days.to_string(),
            s.duration_minutes,
            on_off(s.active)
        );
    }
    out
}

fn render_bottom_nav(active: AppView) -> String {
    let mut out = String::from("--");
    for item in NAV_ITEMS {
        if item.view == active {
            let _ = write!(out, " [{}]", item.label);
        } else {
            let _ = write!(out, "  {} ", item.label);
        }
    }
    out.push('\n');
    out
}
