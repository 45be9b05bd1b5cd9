//! In-memory irrigation schedule book and the "new schedule" editor.
//!
//! ```text
//! ┌──────────────────────────┐   save()   ┌──────────────────────────┐
//! │ ScheduleDraft            │───────────▶│ ScheduleBook             │
//! │ hour · minute · AM/PM    │            │ [Schedule; ≤ 16]         │
//! │ duration · repeat days   │            │ toggle · remove · list   │
//! └──────────────────────────┘            └──────────────────────────┘
//! ```
//!
//! Schedules are displayed and edited only.  Nothing fires from them and
//! they do not survive the process.

use core::fmt::{self, Write as _};
use core::str::FromStr;

use heapless::Vec;
use log::info;

use crate::error::{CommandError, ScheduleError};

// ═══════════════════════════════════════════════════════════════
//  Days
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Day {
    Mon = 0b000_0001,
    Tue = 0b000_0010,
    Wed = 0b000_0100,
    Thu = 0b000_1000,
    Fri = 0b001_0000,
    Sat = 0b010_0000,
    Sun = 0b100_0000,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Single-letter chip label.
    pub fn initial(self) -> char {
        match self {
            Self::Mon => 'M',
            Self::Tue | Self::Thu => 'T',
            Self::Wed => 'W',
            Self::Fri => 'F',
            Self::Sat | Self::Sun => 'S',
        }
    }
}

impl FromStr for Day {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Self::Mon),
            "tue" | "tuesday" => Ok(Self::Tue),
            "wed" | "wednesday" => Ok(Self::Wed),
            "thu" | "thursday" => Ok(Self::Thu),
            "fri" | "friday" => Ok(Self::Fri),
            "sat" | "saturday" => Ok(Self::Sat),
            "sun" | "sunday" => Ok(Self::Sun),
            _ => Err(CommandError::UnknownDay),
        }
    }
}

/// Set of repeat days packed into a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);
    pub const EVERY_DAY: DaySet = DaySet(0b111_1111);
    pub const WEEKENDS: DaySet = DaySet(Day::Sat.mask() | Day::Sun.mask());

    pub fn of(days: &[Day]) -> Self {
        DaySet(days.iter().fold(0, |acc, d| acc | d.mask()))
    }

    pub fn contains(self, day: Day) -> bool {
        self.0 & day.mask() != 0
    }

    pub fn toggle(&mut self, day: Day) {
        self.0 ^= day.mask();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Repeat pattern this set represents.
    pub fn kind(self) -> ScheduleKind {
        match self {
            Self::EVERY_DAY => ScheduleKind::Daily,
            Self::WEEKENDS => ScheduleKind::Weekends,
            _ => ScheduleKind::Custom,
        }
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ScheduleKind::Daily => write!(f, "Daily"),
            ScheduleKind::Weekends => write!(f, "Weekends"),
            ScheduleKind::Custom => {
                let mut first = true;
                for day in Day::ALL.iter().filter(|d| self.contains(**d)) {
                    if !first {
                        f.write_str(", ")?;
                    }
                    f.write_char(day.initial())?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    Daily,
    Weekends,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Am => write!(f, "AM"),
            Self::Pm => write!(f, "PM"),
        }
    }
}

/// 12-hour wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    /// 1–12.
    pub hour: u8,
    /// 0–59.
    pub minute: u8,
    pub period: Period,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.period)
    }
}

/// A single schedule entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: u32,
    pub time: ClockTime,
    pub days: DaySet,
    pub duration_minutes: u16,
    pub active: bool,
}

impl Schedule {
    pub fn kind(&self) -> ScheduleKind {
        self.days.kind()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Schedule book
// ═══════════════════════════════════════════════════════════════

/// Maximum number of schedules (stack-allocated).
pub const MAX_SCHEDULES: usize = 16;

/// The list shown under "Upcoming Schedules".
#[derive(Debug, Clone)]
pub struct ScheduleBook {
    schedules: Vec<Schedule, MAX_SCHEDULES>,
    next_id: u32,
}

impl Default for ScheduleBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBook {
    /// An empty book.
    pub fn new() -> Self {
        Self {
            schedules: Vec::new(),
            next_id: 1,
        }
    }

    /// The three sample schedules the dashboard ships with.
    pub fn with_samples() -> Self {
        let mut book = Self::new();
        let samples = [
            (ClockTime { hour: 6, minute: 0, period: Period::Am }, DaySet::EVERY_DAY, 30, true),
            (
                ClockTime { hour: 8, minute: 0, period: Period::Pm },
                DaySet::of(&[Day::Mon, Day::Wed, Day::Fri]),
                15,
                false,
            ),
            (ClockTime { hour: 5, minute: 30, period: Period::Am }, DaySet::WEEKENDS, 60, true),
        ];
        for (time, days, duration_minutes, active) in samples {
            // Capacity is far above three.
            let _ = book.insert(time, days, duration_minutes, active);
        }
        book
    }

    fn insert(
        &mut self,
        time: ClockTime,
        days: DaySet,
        duration_minutes: u16,
        active: bool,
    ) -> Result<u32, ScheduleError> {
        let id = self.next_id;
        let schedule = Schedule {
            id,
            time,
            days,
            duration_minutes,
            active,
        };
        self.schedules.push(schedule).map_err(|_| ScheduleError::Full)?;
        self.next_id += 1;
        Ok(id)
    }

    /// Append an active schedule built from `draft`.  Returns the new id.
    pub fn add(&mut self, draft: &ScheduleDraft) -> Result<u32, ScheduleError> {
        if draft.days.is_empty() {
            return Err(ScheduleError::NoDaysSelected);
        }
        let id = self.insert(draft.time, draft.days, draft.duration_minutes, true)?;
        info!(
            "Schedules: added #{} at {} ({}, {} min)",
            id, draft.time, draft.days, draft.duration_minutes
        );
        Ok(id)
    }

    /// Remove a schedule by id.
    pub fn remove(&mut self, id: u32) -> Result<Schedule, ScheduleError> {
        let idx = self
            .schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        let removed = self.schedules.remove(idx);
        info!("Schedules: removed #{}", id);
        Ok(removed)
    }

    /// Flip the enable switch of a schedule.  Returns the new value.
    pub fn toggle_active(&mut self, id: u32) -> Result<bool, ScheduleError> {
        let schedule = self
            .schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        schedule.active = !schedule.active;
        info!(
            "Schedules: #{} {}",
            id,
            if schedule.active { "enabled" } else { "disabled" }
        );
        Ok(schedule.active)
    }

    pub fn get(&self, id: u32) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.iter()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Number of enabled schedules.
    pub fn active_count(&self) -> usize {
        self.schedules.iter().filter(|s| s.active).count()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Draft editor
// ═══════════════════════════════════════════════════════════════

/// Shortest duration the editor allows (minutes).
const MIN_DRAFT_DURATION: u16 = 5;

/// The "New Schedule" card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub time: ClockTime,
    pub duration_minutes: u16,
    pub days: DaySet,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            time: ClockTime {
                hour: 6,
                minute: 30,
                period: Period::Am,
            },
            duration_minutes: 45,
            days: DaySet::of(&[Day::Mon, Day::Wed, Day::Fri]),
        }
    }
}

impl ScheduleDraft {
    /// Advance the hour; 12 wraps to 1.
    pub fn cycle_hour(&mut self) {
        self.time.hour = if self.time.hour >= 12 { 1 } else { self.time.hour + 1 };
    }

    /// Advance the minute; 59 wraps to 0.
    pub fn cycle_minute(&mut self) {
        self.time.minute = if self.time.minute >= 59 { 0 } else { self.time.minute + 1 };
    }

    pub fn toggle_period(&mut self) {
        self.time.period = match self.time.period {
            Period::Am => Period::Pm,
            Period::Pm => Period::Am,
        };
    }

    /// Shift the duration by `delta` minutes, never below five.
    pub fn adjust_duration(&mut self, delta: i32) {
        let next = (i32::from(self.duration_minutes) + delta).clamp(i32::from(MIN_DRAFT_DURATION), i32::from(u16::MAX));
        self.duration_minutes = next as u16;
    }

    pub fn toggle_day(&mut self, day: Day) {
        self.days.toggle(day);
    }

    /// One-line summary for the editor card.
    pub fn summary(&self) -> heapless::String<64> {
        let mut s = heapless::String::new();
        // Longest case is six custom days: well under 64 bytes.
        let _ = write!(s, "{} | {} min | {}", self.time, self.duration_minutes, self.days);
        s
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
