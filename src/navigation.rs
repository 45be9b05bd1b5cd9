//! Screen routing between the four dashboard views.
//!
//! ```text
//!            ┌──────────── bottom nav ────────────┐
//!  Dashboard ◀──▶ Analytics ◀──▶ Controls ◀──▶ Scheduling
//!      ▲              │                            │
//!      └──── back ────┴────────── back ────────────┘
//! ```
//!
//! Scheduling is a sub-page: it hides the bottom navigation bar and is
//! left through `back`.

use core::fmt;
use core::str::FromStr;

use log::{debug, info};

use crate::error::CommandError;

/// The four screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppView {
    Dashboard,
    Analytics,
    Controls,
    Scheduling,
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Analytics => write!(f, "Analytics"),
            Self::Controls => write!(f, "Controls"),
            Self::Scheduling => write!(f, "Scheduling"),
        }
    }
}

impl FromStr for AppView {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dashboard" | "home" => Ok(Self::Dashboard),
            "analytics" => Ok(Self::Analytics),
            "controls" => Ok(Self::Controls),
            "scheduling" | "schedule" => Ok(Self::Scheduling),
            _ => Err(CommandError::UnknownView),
        }
    }
}

/// One entry of the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub view: AppView,
    pub label: &'static str,
}

/// Bottom navigation bar, left to right.
pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem { view: AppView::Dashboard, label: "Home" },
    NavItem { view: AppView::Analytics, label: "Analytics" },
    NavItem { view: AppView::Controls, label: "Controls" },
    NavItem { view: AppView::Scheduling, label: "Schedule" },
];

/// Tracks the active view.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: AppView,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: AppView::Dashboard,
        }
    }

    pub fn current(&self) -> AppView {
        self.current
    }

    /// Switch to `view`.  Returns the view that was left, or `None` when
    /// `view` was already active.
    pub fn navigate(&mut self, view: AppView) -> Option<AppView> {
        if view == self.current {
            debug!("NAV: already on {}", view);
            return None;
        }
        let prev = self.current;
        self.current = view;
        info!("NAV: {} -> {}", prev, view);
        Some(prev)
    }

    /// Sub-pages return to the Dashboard; elsewhere this does nothing.
    pub fn back(&mut self) -> Option<AppView> {
        match self.current {
            AppView::Scheduling | AppView::Analytics => self.navigate(AppView::Dashboard),
            _ => None,
        }
    }

    /// Whether the bottom navigation bar is drawn on the active view.
    pub fn bottom_nav_visible(&self) -> bool {
        self.current != AppView::Scheduling
    }
}
