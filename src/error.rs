//! Unified error types for the irrigation controller.
//!
//! Session transitions never fail (duration input is clamped, toggles are
//! boolean flips).  Errors only arise at the edges: parsing a console
//! line, editing the schedule book, or sending an intent to a view that is
//! not mounted.  All variants are `Copy`.

use core::fmt;

use crate::navigation::AppView;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the session core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A console line could not be turned into an event.
    Command(CommandError),
    /// A schedule book or draft operation was rejected.
    Schedule(ScheduleError),
    /// The intent targets a view that is not currently mounted.
    ViewInactive(AppView),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Schedule(e) => write!(f, "schedule: {e}"),
            Self::ViewInactive(view) => write!(f, "{view} view is not open"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Blank input line.
    Empty,
    /// First word is not a known command.
    UnknownCommand,
    /// A required argument is missing.
    MissingArgument,
    /// Argument should have been an integer.
    InvalidNumber,
    UnknownDevice,
    UnknownMode,
    UnknownView,
    UnknownDay,
    UnknownRange,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::MissingArgument => write!(f, "missing argument"),
            Self::InvalidNumber => write!(f, "expected a whole number"),
            Self::UnknownDevice => write!(f, "unknown device (pump, mist, lights)"),
            Self::UnknownMode => write!(f, "unknown mode (auto, manual)"),
            Self::UnknownView => write!(f, "unknown view (dashboard, analytics, controls, schedule)"),
            Self::UnknownDay => write!(f, "unknown day (Mon..Sun)"),
            Self::UnknownRange => write!(f, "unknown range (24h, 7d)"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Schedule errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// No schedule carries this id.
    NotFound(u32),
    /// The schedule book is at capacity.
    Full,
    /// A draft cannot be saved without at least one repeat day.
    NoDaysSelected,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "no schedule with id {id}"),
            Self::Full => write!(f, "schedule list is full"),
            Self::NoDaysSelected => write!(f, "select at least one day"),
        }
    }
}

impl From<ScheduleError> for Error {
    fn from(e: ScheduleError) -> Self {
        Self::Schedule(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
