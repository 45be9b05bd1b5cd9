//! Controller loop: event-driven, reactor-timed.
//!
//! One async task owns the [`DashboardShell`].  It waits on two sources:
//!
//! 1. **Events**: `EventChannel::receive().await`, wakes as soon as a
//!    producer sends
//! 2. **Countdown**: an `async_io_mini::Timer`, armed only while a
//!    session is running and dropped the moment it stops.  On the host
//!    its wakeups come from the `embassy-time` std driver
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────┐
//!  │  futures_lite::future::block_on                          │
//!  │  ┌────────────────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor                      │  │
//!  │  │  ┌──────────────────────────────────────────────┐  │  │
//!  │  │  │  run_controller                              │  │  │
//!  │  │  │  or(events.receive(), countdown) ──▶ shell   │  │  │
//!  │  │  └──────────────────────────────────────────────┘  │  │
//!  │  └────────────────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Events win ties with the countdown, so a `stop` queued before a
//! tick is always applied first.

use core::pin::Pin;
use core::time::Duration;

use async_io_mini::Timer;
// Links the std time driver that `Timer` schedules its wakeups on.
use embassy_time as _;
use futures_lite::future;
use log::{debug, info};

use crate::app::ports::{ActuatorPort, EventSink, SensorPort};
use crate::app::shell::DashboardShell;
use crate::events::{Event, EventChannel};

/// What a finished controller loop did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Events taken off the channel, `Quit` included.
    pub events: u32,
    /// Countdown periods delivered to a running session.
    pub ticks: u32,
}

enum Wake {
    Event(Event),
    Tick,
}

/// Drive `shell` until a [`Event::Quit`] arrives.
///
/// `period` is the length of one countdown second; tests shorten it.
pub async fn run_controller<H, S>(
    shell: &mut DashboardShell,
    events: &EventChannel,
    hw: &mut H,
    sink: &mut S,
    period: Duration,
) -> ControllerStats
where
    H: SensorPort + ActuatorPort,
    S: EventSink,
{
    let mut stats = ControllerStats::default();
    let mut countdown: Option<Pin<Box<Timer>>> = None;

    info!("CTRL | loop started, countdown period {:?}", period);

    loop {
        let wake = {
            let received = async { Wake::Event(events.receive().await) };
            let elapsed = async {
                match countdown.as_mut() {
                    Some(timer) => {
                        timer.as_mut().await;
                    }
                    None => future::pending::<()>().await,
                }
                Wake::Tick
            };
            future::or(received, elapsed).await
        };

        match wake {
            Wake::Event(event) => {
                stats.events += 1;
                let quit = event == Event::Quit;
                if let Err(e) = shell.dispatch(event, hw, sink) {
                    debug!("CTRL | {:?} refused: {}", event, e);
                }
                if quit {
                    break;
                }
            }
            Wake::Tick => {
                countdown = None;
                stats.ticks += 1;
                shell.tick(hw, sink);
            }
        }

        if shell.countdown_active() {
            if countdown.is_none() {
                countdown = Some(Box::pin(Timer::after(period)));
            }
        } else if countdown.take().is_some() {
            debug!("CTRL | countdown timer cancelled");
        }
    }

    info!(
        "CTRL | loop finished after {} events, {} ticks",
        stats.events, stats.ticks
    );
    stats
}

/// Run the controller loop to completion on the calling thread.
pub fn block_on_controller<H, S>(
    shell: &mut DashboardShell,
    events: &EventChannel,
    hw: &mut H,
    sink: &mut S,
    period: Duration,
) -> ControllerStats
where
    H: SensorPort + ActuatorPort,
    S: EventSink,
{
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();
    futures_lite::future::block_on(executor.run(run_controller(shell, events, hw, sink, period)))
}
