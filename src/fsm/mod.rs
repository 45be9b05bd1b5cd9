//! Function-pointer finite state machine engine.
//!
//! The manual-irrigation session is a two-state machine expressed as a
//! table of plain `fn` pointers:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId │ on_enter  │ on_exit  │ on_tick           │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Idle    │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Running │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each elapsed countdown second the engine calls `on_tick` for the
//! **current** state.  If it returns `Some(next_id)`, the engine runs
//! `on_exit` for the current state, then `on_enter` for the next, and
//! updates the current pointer.  The whole transition happens inside one
//! `&mut` call, so no caller can observe a half-applied state.

pub mod context;
pub mod states;

use context::SessionContext;
use log::info;
use serde::Serialize;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all session states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum StateId {
    /// No countdown active.
    Idle = 0,
    /// Manual irrigation countdown active, pump on.
    Running = 1,
}

impl StateId {
    /// Total number of states: used to size the table array.
    pub const COUNT: usize = 2;
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut SessionContext);

/// Signature for the per-second tick handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateTickFn = fn(&mut SessionContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single session state.  Rows sit at the index
/// of their `id`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_tick: StateTickFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and the current-state pointer; the mutable
/// [`SessionContext`] is threaded through every handler call.
pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
    tick_count: u64,
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, row)| row.id as usize == i),
            "state table rows out of order"
        );
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut SessionContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one elapsed second.
    pub fn tick(&mut self, ctx: &mut SessionContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;

        let next = (self.table[self.current].on_tick)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (user intents: start, stop,
    /// emergency stop).  A transition to the current state is a no-op.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut SessionContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.table[self.current].id
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    fn transition(&mut self, next_id: StateId, ctx: &mut SessionContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
