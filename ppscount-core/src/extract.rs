//! Source-address extraction

use crate::event::{NetworkRecord, PacketEvent};

/// Return the source address of `event` if its network layer is IPv4.
///
/// Frames without a network layer, and IPv6 frames, yield `None`. Absence
/// means "nothing to count" and leaves the caller's state untouched.
pub fn source_address(event: &PacketEvent) -> Option<String> {
    match event.network {
        Some(NetworkRecord::Ipv4 { source, .. }) => Some(source.to_string()),
        _ => None,
    }
}
