//! ppscount core library
//!
//! This crate provides the domain types and the event-multiplexing loop for
//! ppscount: decoded packet events, source-address extraction, the per-epoch
//! aggregation window, the report renderer, and the runner that multiplexes
//! ticks, shutdown, and packet arrival.
//!
//! The capture subsystem is an external collaborator; the loop consumes
//! decoded [`PacketEvent`]s through a channel and never touches pcap itself.

pub mod error;
pub mod event;
pub mod extract;
pub mod report;
pub mod runner;
pub mod window;

// Re-export commonly used types
pub use error::{Error, Result};
pub use event::{NetworkRecord, PacketEvent};
pub use extract::source_address;
pub use report::Reporter;
pub use runner::{Event, Runner, State, StopReason};
pub use window::{AddressCounts, AggregationWindow};
