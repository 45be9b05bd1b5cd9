//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!          start()
//!  IDLE ─────────────▶ RUNNING ──┐
//!    ▲                    │      │ tick(): remaining -= 1
//!    │                    │ ◀────┘
//!    └────────────────────┘
//!     remaining == 0 | stop() | pump off | emergency stop
//! ```
//!
//! Every way out of `RUNNING` goes through `running_exit`, which zeroes
//! the countdown and switches the pump off.

use super::context::SessionContext;
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once per session.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_tick: idle_tick,
        },
        // Index 1: Running
        StateDescriptor {
            id: StateId::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: Some(running_exit),
            on_tick: running_tick,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut SessionContext) {
    ctx.remaining_secs = 0;
    info!(
        "IDLE: duration set to {} min, mode {}",
        ctx.requested_duration_minutes, ctx.mode
    );
}

fn idle_tick(_ctx: &mut SessionContext) -> Option<StateId> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING state: manual irrigation countdown, pump on
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut SessionContext) {
    ctx.remaining_secs = ctx.requested_secs();
    ctx.devices.pump = true;
    info!(
        "RUNNING: pump on for {} min ({}s)",
        ctx.requested_duration_minutes, ctx.remaining_secs
    );
}

fn running_exit(ctx: &mut SessionContext) {
    ctx.remaining_secs = 0;
    ctx.devices.pump = false;
    info!("RUNNING: pump off, countdown cleared");
}

fn running_tick(ctx: &mut SessionContext) -> Option<StateId> {
    ctx.remaining_secs = ctx.remaining_secs.saturating_sub(1);

    if ctx.remaining_secs == 0 {
        info!("RUNNING: countdown complete after {}s", ctx.ticks_in_state);
        return Some(StateId::Idle);
    }

    None
}
