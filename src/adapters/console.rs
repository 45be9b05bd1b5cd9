//! Console adapter: stdin lines in, panels out.
//!
//! [`parse_line`] turns one line of operator input into an [`Event`].
//! [`ConsoleRenderer`] implements [`EventSink`] and prints the active
//! view as a text panel, or one JSON object per line with `--json`.
//!
//! ```text
//!   start | stop | +N | -N | adjust N | set N
//!   toggle pump|mist|lights | estop | mode auto|manual
//!   go dashboard|analytics|controls|schedule | back | range 24h|7d
//!   sched list|toggle ID|remove ID|hour|minute|period|day Mon|dur N|save
//!   show | quit
//! ```

use std::io::{BufRead, Write};

use futures_lite::future;
use log::warn;
use serde_json::json;

use crate::app::commands::{AppCommand, ScheduleCommand};
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::display;
use crate::error::CommandError;
use crate::events::{Event, EventChannel};

/// Parse one console line.  `step` is what a bare `+` or `-` adjusts by.
pub fn parse_line(line: &str, step: u16) -> Result<Event, CommandError> {
    let mut words = line.split_whitespace();
    let head = words.next().ok_or(CommandError::Empty)?;
    let head = head.to_ascii_lowercase();

    let event = match head.as_str() {
        "start" => Event::Control(AppCommand::Start),
        "stop" => Event::Control(AppCommand::Stop),
        "+" => Event::Control(AppCommand::AdjustDuration(i32::from(step))),
        "-" => Event::Control(AppCommand::AdjustDuration(-i32::from(step))),
        "adjust" => Event::Control(AppCommand::AdjustDuration(number(words.next())?)),
        "set" => Event::Control(AppCommand::SetDuration(number(words.next())?)),
        "toggle" => Event::Control(AppCommand::ToggleDevice(arg(words.next())?.parse()?)),
        "estop" => Event::Control(AppCommand::EmergencyStop),
        "mode" => Event::Control(AppCommand::SetMode(arg(words.next())?.parse()?)),
        "go" => Event::Navigate(arg(words.next())?.parse()?),
        "back" => Event::Back,
        "range" => Event::SelectRange(arg(words.next())?.parse()?),
        "sched" => Event::Schedule(parse_schedule(&mut words)?),
        "show" => Event::Show,
        "quit" | "exit" => Event::Quit,
        // `+10` / `-10`
        other if other.starts_with(['+', '-']) => {
            Event::Control(AppCommand::AdjustDuration(number(Some(other))?))
        }
        _ => return Err(CommandError::UnknownCommand),
    };
    Ok(event)
}

/// Feed `reader` into `events` one parsed line at a time until `quit` or
/// end of input, then send [`Event::Quit`].
///
/// Sends block while the channel is full, so no intent is ever dropped.
/// Returns the number of events forwarded, the final `Quit` included.
pub fn forward_lines<R: BufRead>(reader: R, events: &EventChannel, step: u16) -> usize {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("CONSOLE | read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line, step) {
            Ok(Event::Quit) => break,
            Ok(event) => {
                future::block_on(events.send(event));
                forwarded += 1;
            }
            Err(e) => warn!("CONSOLE | {:?}: {}", line.trim(), e),
        }
    }
    future::block_on(events.send(Event::Quit));
    forwarded + 1
}

fn parse_schedule<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<ScheduleCommand, CommandError> {
    let sub = arg(words.next())?.to_ascii_lowercase();
    let cmd = match sub.as_str() {
        "list" => ScheduleCommand::List,
        "toggle" => ScheduleCommand::ToggleActive(id(words.next())?),
        "remove" | "rm" => ScheduleCommand::Remove(id(words.next())?),
        "hour" => ScheduleCommand::CycleHour,
        "minute" => ScheduleCommand::CycleMinute,
        "period" => ScheduleCommand::TogglePeriod,
        "day" => ScheduleCommand::ToggleDay(arg(words.next())?.parse()?),
        "dur" => ScheduleCommand::AdjustDuration(number(words.next())?),
        "save" => ScheduleCommand::Save,
        _ => return Err(CommandError::UnknownCommand),
    };
    Ok(cmd)
}

fn arg(word: Option<&str>) -> Result<&str, CommandError> {
    word.ok_or(CommandError::MissingArgument)
}

fn number(word: Option<&str>) -> Result<i32, CommandError> {
    arg(word)?.parse().map_err(|_| CommandError::InvalidNumber)
}

fn id(word: Option<&str>) -> Result<u32, CommandError> {
    arg(word)?.parse().map_err(|_| CommandError::InvalidNumber)
}

// ───────────────────────────────────────────────────────────────
// Renderer
// ───────────────────────────────────────────────────────────────

/// Prints what the operator needs to see.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn text(&mut self, event: &AppEvent) -> std::io::Result<()> {
        match event {
            AppEvent::Rendered(model) => {
                writeln!(self.out, "{}", display::render(model))?;
            }
            AppEvent::CountdownFinished => writeln!(self.out, "Irrigation complete.")?,
            AppEvent::EmergencyStop => writeln!(self.out, "EMERGENCY STOP: all devices off")?,
            AppEvent::Rejected(e) => writeln!(self.out, "! {}", e)?,
            _ => return Ok(()),
        }
        self.out.flush()
    }

    fn json(&mut self, event: &AppEvent) -> std::io::Result<()> {
        let value = match event {
            AppEvent::Mounted(s) => json!({ "event": "mounted", "session": s }),
            AppEvent::Unmounted => json!({ "event": "unmounted" }),
            AppEvent::SessionUpdated(s) => json!({ "event": "session", "session": s }),
            AppEvent::CountdownFinished => json!({ "event": "countdown_finished" }),
            AppEvent::EmergencyStop => json!({ "event": "emergency_stop" }),
            AppEvent::ViewChanged { from, to } => {
                json!({ "event": "view", "from": from.to_string(), "to": to.to_string() })
            }
            AppEvent::Rejected(e) => json!({ "event": "rejected", "error": e.to_string() }),
            AppEvent::StateChanged { .. } | AppEvent::Rendered(_) => return Ok(()),
        };
        writeln!(self.out, "{}", value)?;
        self.out.flush()
    }
}

impl<W: Write> EventSink for ConsoleRenderer<W> {
    fn emit(&mut self, event: &AppEvent) {
        let written = if self.json { self.json(event) } else { self.text(event) };
        if let Err(e) = written {
            warn!("CONSOLE | write failed: {}", e);
        }
    }
}
