//! Example: List network interfaces
//!
//! Run with: cargo run --example list_interfaces

use ppscount_capture::list_interfaces;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for iface in list_interfaces()? {
        let state = if iface.is_capture_capable() {
            "capture-capable"
        } else if iface.is_loopback {
            "loopback"
        } else {
            "down"
        };

        println!("{:<16} {}", iface.name, state);
        if let Some(mac) = &iface.mac {
            println!("    mac: {}", mac);
        }
        for ip in &iface.ips {
            println!("    ip:  {}", ip);
        }
    }

    Ok(())
}
