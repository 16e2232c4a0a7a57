//! Event-multiplexing loop
//!
//! Waits on whichever of three sources becomes ready first (the one-second
//! report tick, the shutdown notification, packet arrival) and dispatches
//! the resulting event to a single handler. Exactly one event is handled at
//! a time; handling runs to completion before the next wait.

use crate::error::Result;
use crate::event::PacketEvent;
use crate::extract::source_address;
use crate::report::Reporter;
use crate::window::AggregationWindow;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Interval between report ticks
const EPOCH: Duration = Duration::from_secs(1);

/// One multiplexed occurrence, whichever source became ready first
#[derive(Debug)]
pub enum Event {
    /// The epoch timer fired
    Tick,
    /// The operator requested shutdown
    Shutdown,
    /// A decoded frame arrived from the capture subsystem
    Packet(PacketEvent),
}

/// Loop state. Every event except shutdown loops back to `Running`;
/// `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Terminated,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Operator interrupt; the partial window is dropped, not flushed
    Interrupted,
    /// The packet source closed its end of the channel
    SourceClosed,
}

/// Owns the aggregation window and drives extraction, reporting, and
/// shutdown.
pub struct Runner<W: Write> {
    window: AggregationWindow,
    reporter: Reporter<W>,
}

impl<W: Write> Runner<W> {
    /// Create a runner with an empty window writing reports to `reporter`
    pub fn new(reporter: Reporter<W>) -> Self {
        Self {
            window: AggregationWindow::new(),
            reporter,
        }
    }

    /// Handle one event to completion
    pub fn handle(&mut self, event: Event) -> Result<State> {
        match event {
            Event::Tick => {
                let snapshot = self.window.snapshot_and_reset();
                self.reporter.report(&snapshot)?;
                Ok(State::Running)
            }
            Event::Shutdown => {
                info!("interrupt received, stopping");
                Ok(State::Terminated)
            }
            Event::Packet(packet) => {
                if let Some(address) = source_address(&packet) {
                    self.window.increment(address);
                }
                Ok(State::Running)
            }
        }
    }

    /// Multiplex the three event sources until shutdown.
    ///
    /// The shutdown channel is buffered by the caller, so a notification
    /// arriving while another event is mid-handling is observed on the next
    /// iteration rather than lost. A closed shutdown channel is treated as a
    /// request to stop. The first tick fires one epoch after entry, and
    /// later ticks are scheduled relative to the previous one.
    pub async fn run(
        &mut self,
        mut packets: mpsc::Receiver<PacketEvent>,
        mut shutdown: mpsc::Receiver<()>,
    ) -> Result<StopReason> {
        let mut ticker = time::interval_at(Instant::now() + EPOCH, EPOCH);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!("event loop started");
        loop {
            let event = tokio::select! {
                _ = ticker.tick() => Event::Tick,
                _ = shutdown.recv() => Event::Shutdown,
                received = packets.recv() => match received {
                    Some(packet) => Event::Packet(packet),
                    None => {
                        warn!("packet source closed, stopping");
                        return Ok(StopReason::SourceClosed);
                    }
                },
            };

            if self.handle(event)? == State::Terminated {
                return Ok(StopReason::Interrupted);
            }
        }
    }
}
