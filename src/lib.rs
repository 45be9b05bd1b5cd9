//! AgroMatrix irrigation dashboard library.
//!
//! Exposes the pure-logic modules (session FSM, navigation, schedules,
//! rendering) together with the host adapters and the controller loop,
//! so the binary stays thin and everything is reachable from tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod fsm;
pub mod navigation;
pub mod runtime;
pub mod scheduler;
pub mod sensors;
