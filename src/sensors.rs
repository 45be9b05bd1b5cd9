//! Mock field sensors and the fixed analytics series.
//!
//! There is no acquisition: every reading is a constant, delivered
//! through [`SensorPort`](crate::app::ports::SensorPort) so the display
//! side never reaches for the literals directly.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::CommandError;

/// A point-in-time snapshot of every field reading shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorSnapshot {
    /// Volumetric soil moisture (%).
    pub soil_moisture_pct: u8,
    /// Air temperature at the field station (°C).
    pub air_temperature_c: f32,
    /// Temperature shown on the Controls panel (°C).
    pub controls_temperature_c: f32,
    /// Relative humidity (%).
    pub humidity_pct: u8,
    /// Outdoor temperature from the weather widget (°C).
    pub weather_temperature_c: f32,
    pub weather_summary: &'static str,
    /// Field label, e.g. "Field 3 • North Zone".
    pub location: &'static str,
}

/// The readings the dashboard ships with.
pub const FIELD_READINGS: SensorSnapshot = SensorSnapshot {
    soil_moisture_pct: 65,
    air_temperature_c: 28.0,
    controls_temperature_c: 24.0,
    humidity_pct: 42,
    weather_temperature_c: 32.0,
    weather_summary: "Sunny, Clear Sky",
    location: "Field 3 \u{2022} North Zone",
};

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// One sample of the analytics chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time: &'static str,
    pub moisture_pct: u8,
    pub temperature_c: u8,
}

const fn point(time: &'static str, moisture_pct: u8, temperature_c: u8) -> ChartPoint {
    ChartPoint {
        time,
        moisture_pct,
        temperature_c,
    }
}

/// 24 h history at 3-hour spacing.
pub const SERIES_24H: [ChartPoint; 8] = [
    point("00:00", 45, 18),
    point("03:00", 55, 19),
    point("06:00", 60, 22),
    point("09:00", 68, 26),
    point("12:00", 58, 28),
    point("15:00", 65, 27),
    point("18:00", 75, 24),
    point("21:00", 60, 22),
];

/// Time-range selector on the Analytics view.  Only the label changes;
/// both ranges chart the same series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    Day,
    Week,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "24h"),
            Self::Week => write!(f, "7d"),
        }
    }
}

impl FromStr for TimeRange {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "24h" | "day" => Ok(Self::Day),
            "7d" | "week" => Ok(Self::Week),
            _ => Err(CommandError::UnknownRange),
        }
    }
}
