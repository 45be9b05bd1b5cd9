//! AgroMatrix console dashboard: main entry point.
//!
//! Hexagonal architecture with an event-driven controller loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedFarm      LogEventSink   ConsoleRenderer             │
//! │  (Sensor+Actuator)  (EventSink)    (EventSink)                 │
//! │  JsonConfigFile     stdin reader ──▶ EventChannel              │
//! │  (ConfigPort)                                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        DashboardShell ─▶ IrrigationService             │    │
//! │  │        Navigator · ScheduleBook · FSM                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use agromatrix::adapters::config_file::JsonConfigFile;
use agromatrix::adapters::console::{ConsoleRenderer, forward_lines};
use agromatrix::adapters::log_sink::LogEventSink;
use agromatrix::adapters::simulated::SimulatedFarm;
use agromatrix::app::ports::ConfigPort;
use agromatrix::app::shell::DashboardShell;
use agromatrix::events::{Event, EventChannel};
use agromatrix::runtime::block_on_controller;

/// Inbound events from the stdin reader to the controller loop.
static EVENTS: EventChannel = EventChannel::new();

#[derive(Parser, Debug)]
#[command(name = "agromatrix", version, about = "AgroMatrix irrigation dashboard console")]
struct Args {
    /// JSON controller configuration (defaults apply when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the countdown tick period in milliseconds
    #[arg(long)]
    interval_ms: Option<u32>,

    /// Print one JSON object per event instead of text panels
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ── 1. Logging ────────────────────────────────────────────
    // `log` records from the library reach the subscriber through its
    // tracing-log bridge.  Panels go to stdout, logs to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("AgroMatrix v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let port = JsonConfigFile::new(args.config);
    let mut config = port.load().with_context(|| match port.path() {
        Some(p) => format!("loading configuration from {}", p.display()),
        None => "loading default configuration".to_owned(),
    })?;
    if let Some(ms) = args.interval_ms {
        config.countdown_interval_ms = ms;
        config.validate().context("--interval-ms")?;
    }
    let period = Duration::from_millis(u64::from(config.countdown_interval_ms));
    let step = config.duration_step_minutes;

    // ── 3. Console reader ─────────────────────────────────────
    std::thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            let forwarded = forward_lines(std::io::stdin().lock(), &EVENTS, step);
            info!("CONSOLE | input closed after {} events", forwarded);
        })
        .context("spawning console reader")?;

    // ── 4. Controller loop ────────────────────────────────────
    let mut shell = DashboardShell::new(config);
    let mut farm = SimulatedFarm::new();
    let mut sink = (LogEventSink::new(), ConsoleRenderer::new(std::io::stdout(), args.json));

    futures_lite::future::block_on(EVENTS.send(Event::Show));
    let stats = block_on_controller(&mut shell, &EVENTS, &mut farm, &mut sink, period);

    info!(
        "Shut down: {} events, {} countdown ticks, {} relay writes",
        stats.events,
        stats.ticks,
        farm.writes()
    );
    Ok(())
}
