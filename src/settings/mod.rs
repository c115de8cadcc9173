//! Network Settings
//!
//! Defines the connection settings snapshot the supervisor works from.
//!
//! # Fields
//!
//! - `ssid` - Wi-Fi network name (max 32 chars; empty disables Wi-Fi)
//! - `password` - Wi-Fi password (max 63 chars)
//! - `hostname` - Hostname announced by the interfaces (max 32 chars)
//! - `static_ip_config` - Use the static fields below instead of DHCP
//! - `local_ip` / `gateway_ip` / `subnet_mask` / `dns_ip1` / `dns_ip2`
//!
//! A settings service owns the stored configuration and hands the supervisor
//! a fresh snapshot on every change; the snapshot is replaced wholesale,
//! never mutated in place.
//!
//! # Build-time defaults
//!
//! `build_defaults()` is populated from `WIFI_*` environment variables at
//! compile time (see `build.rs`), so a freshly flashed image can join a
//! network before any settings service runs.
//!
//! # Security Note
//!
//! A password provided via `WIFI_PASSWORD` is baked into the firmware image
//! and can be extracted from the binary.

use core::net::Ipv4Addr;

use crate::platform::traits::{Addressing, StaticAddressing};
use heapless::String;

/// Maximum SSID length (IEEE 802.11 standard)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum Wi-Fi password length (WPA2 standard)
pub const MAX_PASSWORD_LEN: usize = 63;

/// Maximum hostname length
pub const MAX_HOSTNAME_LEN: usize = 32;

/// Connection settings snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    /// Wi-Fi network SSID
    pub ssid: String<MAX_SSID_LEN>,
    /// Wi-Fi password (WPA2)
    pub password: String<MAX_PASSWORD_LEN>,
    /// Hostname announced by the interfaces
    pub hostname: String<MAX_HOSTNAME_LEN>,
    /// Use the static fields below instead of DHCP
    pub static_ip_config: bool,
    /// Static local address (used if static_ip_config)
    pub local_ip: Ipv4Addr,
    /// Static gateway address (used if static_ip_config)
    pub gateway_ip: Ipv4Addr,
    /// Subnet mask (used if static_ip_config)
    pub subnet_mask: Ipv4Addr,
    /// Primary DNS server (used if static_ip_config)
    pub dns_ip1: Ipv4Addr,
    /// Secondary DNS server (used if static_ip_config)
    pub dns_ip2: Ipv4Addr,
}

impl NetworkSettings {
    /// Settings baked in at build time from `WIFI_*` environment variables.
    ///
    /// Variables left unset at build time fall back to an unconfigured
    /// (Wi-Fi disabled) DHCP profile; see `build.rs` for the full list.
    pub fn build_defaults() -> Self {
        let ssid = env!("WIFI_SSID");
        let password = env!("WIFI_PASSWORD");
        let hostname = env!("WIFI_HOSTNAME");
        let dhcp = env!("WIFI_DHCP").parse::<bool>().unwrap_or(true);

        Self {
            ssid: String::try_from(ssid).unwrap_or_else(|_| String::new()),
            password: String::try_from(password).unwrap_or_else(|_| String::new()),
            hostname: String::try_from(hostname).unwrap_or_else(|_| String::new()),
            static_ip_config: !dhcp,
            local_ip: parse_ipv4(env!("WIFI_IP")).unwrap_or(Ipv4Addr::UNSPECIFIED),
            gateway_ip: parse_ipv4(env!("WIFI_GATEWAY")).unwrap_or(Ipv4Addr::UNSPECIFIED),
            subnet_mask: parse_ipv4(env!("WIFI_NETMASK"))
                .unwrap_or(Ipv4Addr::new(255, 255, 255, 0)),
            dns_ip1: parse_ipv4(env!("WIFI_DNS")).unwrap_or(Ipv4Addr::UNSPECIFIED),
            dns_ip2: parse_ipv4(env!("WIFI_DNS2")).unwrap_or(Ipv4Addr::UNSPECIFIED),
        }
    }

    /// Check if Wi-Fi is configured
    ///
    /// Returns true if the SSID is not empty. An empty SSID means Wi-Fi is
    /// administratively disabled and no connection is ever attempted.
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }

    /// Addressing mode for the station interface under these settings.
    pub fn addressing(&self) -> Addressing {
        if self.static_ip_config {
            Addressing::Static(self.static_addressing())
        } else {
            Addressing::Dhcp
        }
    }

    /// The static address set, regardless of `static_ip_config`.
    pub fn static_addressing(&self) -> StaticAddressing {
        StaticAddressing {
            local: self.local_ip,
            gateway: self.gateway_ip,
            subnet_mask: self.subnet_mask,
            dns_primary: self.dns_ip1,
            dns_secondary: self.dns_ip2,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            hostname: String::try_from("pico-link").unwrap_or_else(|_| String::new()),
            static_ip_config: false,
            local_ip: Ipv4Addr::UNSPECIFIED,
            gateway_ip: Ipv4Addr::UNSPECIFIED,
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            dns_ip1: Ipv4Addr::UNSPECIFIED,
            dns_ip2: Ipv4Addr::UNSPECIFIED,
        }
    }
}

/// Parse IPv4 address from string (e.g., "192.168.1.1")
///
/// # Arguments
///
/// * `s` - String in "a.b.c.d" format
///
/// # Returns
///
/// Ok(address) if valid, Err if parsing fails
fn parse_ipv4(s: &str) -> core::result::Result<Ipv4Addr, ()> {
    let mut octets = [0u8; 4];
    let mut count = 0;
    for part in s.split('.') {
        if count == octets.len() {
            return Err(());
        }
        octets[count] = part.parse::<u8>().map_err(|_| ())?;
        count += 1;
    }
    if count != octets.len() {
        return Err(());
    }
    Ok(Ipv4Addr::from(octets))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_settings() -> NetworkSettings {
        NetworkSettings {
            ssid: String::try_from("Home").unwrap(),
            password: String::try_from("pw").unwrap(),
            hostname: String::try_from("dev1").unwrap(),
            static_ip_config: true,
            local_ip: Ipv4Addr::new(192, 168, 1, 50),
            gateway_ip: Ipv4Addr::new(192, 168, 1, 1),
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            dns_ip1: Ipv4Addr::new(192, 168, 1, 1),
            dns_ip2: Ipv4Addr::new(1, 1, 1, 1),
        }
    }

    #[test]
    fn test_settings_is_configured() {
        let mut settings = NetworkSettings::default();
        assert!(!settings.is_configured()); // Empty SSID

        settings.ssid = String::try_from("MyNetwork").unwrap();
        assert!(settings.is_configured());
    }

    #[test]
    fn test_settings_addressing_dhcp() {
        let settings = NetworkSettings::default();
        assert_eq!(settings.addressing(), Addressing::Dhcp);
    }

    #[test]
    fn test_settings_addressing_static() {
        let settings = static_settings();
        match settings.addressing() {
            Addressing::Static(addrs) => {
                assert_eq!(addrs.local, Ipv4Addr::new(192, 168, 1, 50));
                assert_eq!(addrs.gateway, Ipv4Addr::new(192, 168, 1, 1));
                assert_eq!(addrs.subnet_mask, Ipv4Addr::new(255, 255, 255, 0));
                assert_eq!(addrs.dns_primary, Ipv4Addr::new(192, 168, 1, 1));
                assert_eq!(addrs.dns_secondary, Ipv4Addr::new(1, 1, 1, 1));
            }
            Addressing::Dhcp => panic!("expected static addressing"),
        }
    }

    #[test]
    fn test_settings_replaced_wholesale() {
        let mut current = static_settings();
        assert!(current.static_ip_config);

        let update = NetworkSettings {
            ssid: String::try_from("Other").unwrap(),
            ..NetworkSettings::default()
        };
        current = update.clone();
        assert_eq!(current, update);
        assert!(!current.static_ip_config);
    }

    #[test]
    fn test_build_defaults_consistent() {
        // Values depend on the build environment; check the invariants that
        // hold for any environment.
        let settings = NetworkSettings::build_defaults();
        assert_eq!(settings.is_configured(), !settings.ssid.is_empty());
        match settings.addressing() {
            Addressing::Static(_) => assert!(settings.static_ip_config),
            Addressing::Dhcp => assert!(!settings.static_ip_config),
        }
    }

    #[test]
    fn test_parse_ipv4_valid() {
        assert_eq!(parse_ipv4("192.168.1.1"), Ok(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(parse_ipv4("0.0.0.0"), Ok(Ipv4Addr::UNSPECIFIED));
        assert_eq!(
            parse_ipv4("255.255.255.255"),
            Ok(Ipv4Addr::new(255, 255, 255, 255))
        );
    }

    #[test]
    fn test_parse_ipv4_invalid() {
        assert!(parse_ipv4("").is_err());
        assert!(parse_ipv4("192.168.1").is_err());
        assert!(parse_ipv4("192.168.1.1.5").is_err());
        assert!(parse_ipv4("192.168.1.256").is_err());
        assert!(parse_ipv4("not.an.ip.addr").is_err());
    }
}
