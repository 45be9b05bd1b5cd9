//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the dashboard: the manual
//! irrigation session, view navigation and schedule editing.  All
//! interaction with devices happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod shell;
