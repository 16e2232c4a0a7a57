//! Live packet source for ppscount
//!
//! This crate wraps pcap for handle management, enumerates network
//! interfaces, and decodes raw frames into the
//! [`PacketEvent`](ppscount_core::PacketEvent) records the event loop
//! consumes.
//!
//! ## Example
//!
//! ```no_run
//! use ppscount_capture::PacketCapture;
//!
//! # fn main() -> ppscount_core::Result<()> {
//! let mut capture = PacketCapture::new("eth0")?;
//! capture.start(|event| {
//!     println!("{} bytes on {}", event.len, event.interface);
//! })?;
//! // Later; also happens on drop.
//! capture.stop();
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod decode;
pub mod interface;

// Re-export main types
pub use capture::{CaptureConfig, PacketCapture};
pub use decode::decode_frame;
pub use interface::{default_interface, get_interface, list_interfaces, InterfaceInfo};
