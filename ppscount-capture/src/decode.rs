//! Frame decoding

use etherparse::{NetSlice, SlicedPacket};
use ppscount_core::{NetworkRecord, PacketEvent};

/// Decode one raw ethernet frame into a packet event.
///
/// Frames that cannot be sliced, or whose network layer is unsupported
/// (ARP and friends), produce an event with `network: None` so the loop
/// can count them as "nothing to extract" rather than an error.
pub fn decode_frame(interface: &str, data: &[u8]) -> PacketEvent {
    let network = match SlicedPacket::from_ethernet(data) {
        Ok(sliced) => sliced.net.map(|net| match net {
            NetSlice::Ipv4(ipv4) => NetworkRecord::Ipv4 {
                source: ipv4.header().source_addr(),
                destination: ipv4.header().destination_addr(),
            },
            NetSlice::Ipv6(ipv6) => NetworkRecord::Ipv6 {
                source: ipv6.header().source_addr(),
                destination: ipv6.header().destination_addr(),
            },
        }),
        Err(_) => None,
    };

    PacketEvent::new(interface.to_string(), data.len(), network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use etherparse::PacketBuilder;

    fn ipv4_frame(source: [u8; 4], destination: [u8; 4]) -> Vec<u8> {
        let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv4(source, destination, 64)
            .udp(4000, 4001);
        let payload = [0u8; 8];
        let mut frame = Vec::with_capacity(builder.size(payload.len()));
        builder.write(&mut frame, &payload).unwrap();
        frame
    }

    #[test]
    fn test_decode_ipv4_frame() {
        let frame = ipv4_frame([10, 0, 0, 1], [192, 0, 2, 7]);
        let event = decode_frame("test0", &frame);

        assert_eq!(event.interface, "test0");
        assert_eq!(event.len, frame.len());
        assert_eq!(
            event.network,
            Some(NetworkRecord::Ipv4 {
                source: "10.0.0.1".parse().unwrap(),
                destination: "192.0.2.7".parse().unwrap(),
            })
        );
    }

    #[test]
    fn test_decode_ipv6_frame() {
        let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv6(
                [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
                64,
            )
            .udp(4000, 4001);
        let payload = [0u8; 8];
        let mut frame = Vec::with_capacity(builder.size(payload.len()));
        builder.write(&mut frame, &payload).unwrap();

        let event = decode_frame("test0", &frame);
        match event.network {
            Some(NetworkRecord::Ipv6 { source, .. }) => {
                assert_eq!(source, "2001:db8::1".parse::<std::net::Ipv6Addr>().unwrap());
            }
            other => panic!("expected IPv6 record, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_arp_frame_has_no_network_record() {
        // Ethernet header with the ARP ethertype and a nonsense payload
        let mut frame = vec![
            0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, // destination
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // source
            0x08, 0x06, // ethertype: ARP
        ];
        frame.extend_from_slice(&[0u8; 28]);

        let event = decode_frame("test0", &frame);
        assert_eq!(event.network, None);
        assert_eq!(event.len, frame.len());
    }

    #[test]
    fn test_decode_truncated_frame_has_no_network_record() {
        let event = decode_frame("test0", &[0x01, 0x02]);
        assert_eq!(event.network, None);
    }
}
