//! Network interface enumeration

use pnet_datalink::NetworkInterface;
use ppscount_core::{Error, Result};
use std::net::IpAddr;

/// Description of a network interface relevant to capture
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface name (e.g. "ens3", "wlan0")
    pub name: String,
    /// Human-readable description, where the platform provides one
    pub description: String,
    /// MAC address, if assigned
    pub mac: Option<String>,
    /// Addresses bound to the interface
    pub ips: Vec<IpAddr>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether this is a loopback interface
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for InterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        InterfaceInfo {
            name: iface.name.clone(),
            description: iface.description.clone(),
            mac: iface.mac.map(|mac| mac.to_string()),
            ips: iface.ips.iter().map(|network| network.ip()).collect(),
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

impl InterfaceInfo {
    /// An interface is usable for live capture when it is up and not loopback
    pub fn is_capture_capable(&self) -> bool {
        self.is_up && !self.is_loopback
    }

    /// First IPv4 address bound to the interface, if any
    pub fn primary_ipv4(&self) -> Option<IpAddr> {
        self.ips
            .iter()
            .find(|ip| matches!(ip, IpAddr::V4(_)))
            .copied()
    }
}

/// List all network interfaces visible to the process
pub fn list_interfaces() -> Result<Vec<InterfaceInfo>> {
    let interfaces = pnet_datalink::interfaces();

    if interfaces.is_empty() {
        return Err(Error::capture(
            "no network interfaces found; are you running with sufficient privileges?",
        ));
    }

    Ok(interfaces.iter().map(InterfaceInfo::from).collect())
}

/// Look up a specific interface by name
pub fn get_interface(name: &str) -> Result<InterfaceInfo> {
    pnet_datalink::interfaces()
        .iter()
        .find(|iface| iface.name == name)
        .map(InterfaceInfo::from)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))
}

/// First up, non-loopback interface
pub fn default_interface() -> Result<InterfaceInfo> {
    list_interfaces()?
        .into_iter()
        .find(|iface| iface.is_capture_capable())
        .ok_or_else(|| Error::capture("no capture-capable interface found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_interfaces() {
        let interfaces = list_interfaces().unwrap();
        // Every machine has at least loopback
        assert!(!interfaces.is_empty());
        for iface in &interfaces {
            assert!(!iface.name.is_empty());
        }
    }

    #[test]
    fn test_loopback_is_not_capture_capable() {
        let interfaces = list_interfaces().unwrap();
        for iface in interfaces.iter().filter(|i| i.is_loopback) {
            assert!(!iface.is_capture_capable());
        }
    }

    #[test]
    fn test_get_nonexistent_interface() {
        let result = get_interface("nonexistent_interface_xyz");
        match result {
            Err(Error::InterfaceNotFound(name)) => {
                assert_eq!(name, "nonexistent_interface_xyz");
            }
            other => panic!("expected InterfaceNotFound, got {:?}", other.map(|i| i.name)),
        }
    }

    #[test]
    fn test_primary_ipv4_skips_v6() {
        let info = InterfaceInfo {
            name: "test0".to_string(),
            description: String::new(),
            mac: None,
            ips: vec![
                "2001:db8::1".parse().unwrap(),
                "10.0.0.1".parse().unwrap(),
            ],
            is_up: true,
            is_loopback: false,
        };

        assert_eq!(info.primary_ipv4(), Some("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_default_interface_is_capture_capable() {
        // May fail on hosts with only loopback; that absence is fine
        if let Ok(iface) = default_interface() {
            assert!(iface.is_capture_capable());
        }
    }

    #[test]
    fn test_get_existing_interface_roundtrips_name() {
        let interfaces = list_interfaces().unwrap();
        let first = &interfaces[0];
        let found = get_interface(&first.name).unwrap();
        assert_eq!(found.name, first.name);
    }
}
