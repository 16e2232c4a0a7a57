//! Decoded packet events

use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::SystemTime;

/// Network-layer portion of a decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRecord {
    /// IPv4 header addresses
    Ipv4 {
        source: Ipv4Addr,
        destination: Ipv4Addr,
    },
    /// IPv6 header addresses
    Ipv6 {
        source: Ipv6Addr,
        destination: Ipv6Addr,
    },
}

/// One captured and decoded frame
///
/// Produced by the capture subsystem and read exactly once by the event
/// loop. Frames without a decodable network layer carry `network: None`;
/// that is an expected outcome, not an error.
#[derive(Debug, Clone)]
pub struct PacketEvent {
    /// When the frame was captured
    pub timestamp: SystemTime,
    /// Interface the frame was received on
    pub interface: String,
    /// Wire length in bytes
    pub len: usize,
    /// Decoded network layer, if the frame carried a supported one
    pub network: Option<NetworkRecord>,
}

impl PacketEvent {
    /// Create a new packet event stamped with the current time
    pub fn new(interface: String, len: usize, network: Option<NetworkRecord>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            interface,
            len,
            network,
        }
    }
}
