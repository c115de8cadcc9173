//! Network interface trait
//!
//! This module defines the capability surface the connection supervisor uses
//! to drive the network driver: state query, addressing, hostname,
//! connect/disconnect, and link event subscription.

use core::net::Ipv4Addr;

use super::events::{LinkEventSink, Subscription};
use crate::platform::Result;

/// Station interface state, answered by a single query.
///
/// Replaces ad-hoc "connected?" and "mode active?" probing so the supervisor
/// never inspects driver mode bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StationState {
    /// Radio idle; station mode not running
    Idle,
    /// Station mode running; no association established
    Started,
    /// Associated with an access point
    Connected,
}

impl StationState {
    /// True when an association is established.
    pub fn is_connected(&self) -> bool {
        matches!(self, StationState::Connected)
    }

    /// True when station mode is running, associated or not.
    ///
    /// A supervisor must not issue a new connect while this holds; the
    /// in-flight attempt either completes or ends in a link event.
    pub fn is_active(&self) -> bool {
        !matches!(self, StationState::Idle)
    }
}

/// Manually assigned IPv4 configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAddressing {
    /// Local interface address
    pub local: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
    /// Subnet mask (e.g. 255.255.255.0)
    pub subnet_mask: Ipv4Addr,
    /// Primary DNS server
    pub dns_primary: Ipv4Addr,
    /// Secondary DNS server
    pub dns_secondary: Ipv4Addr,
}

impl StaticAddressing {
    /// CIDR prefix length derived from the subnet mask.
    ///
    /// Non-contiguous masks are not validated; the result is the count of
    /// set bits, which matches driver behavior for well-formed masks.
    pub fn prefix_len(&self) -> u8 {
        u32::from_be_bytes(self.subnet_mask.octets()).count_ones() as u8
    }

    /// DNS servers in priority order, with unset (0.0.0.0) entries skipped.
    pub fn dns_servers(&self) -> impl Iterator<Item = Ipv4Addr> {
        [self.dns_primary, self.dns_secondary]
            .into_iter()
            .filter(|addr| !addr.is_unspecified())
    }
}

/// Interface addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Lease configuration from a DHCP server
    Dhcp,
    /// Manually assigned configuration
    Static(StaticAddressing),
}

/// Capability surface over the network driver.
///
/// All methods take `&self`: implementations hand the request to the driver
/// (typically over a command queue) and return without waiting for the
/// outcome. Completion is observed through [`LinkEvent`]s and
/// [`station_state`](NetworkInterface::station_state), never through return
/// values, so a `Result::Ok` only means the request was handed off.
///
/// # Contract
///
/// - Calls may arrive from a different context than event delivery; an
///   implementation provides its own interior synchronization.
/// - [`disconnect`](NetworkInterface::disconnect) must be idempotent:
///   repeated requests, including on an already-idle interface, are no-ops
///   (reported as not accepted).
///
/// [`LinkEvent`]: super::events::LinkEvent
pub trait NetworkInterface {
    /// Current station interface state.
    ///
    /// Answered live from the driver; the supervision core never caches it.
    fn station_state(&self) -> StationState;

    /// Stage addressing for the station interface.
    ///
    /// Takes effect with the next [`connect`](NetworkInterface::connect).
    ///
    /// # Errors
    ///
    /// Returns `NetifError` if the request cannot be handed to the driver.
    fn configure_station(&self, addressing: Addressing) -> Result<()>;

    /// Apply addressing to the secondary Ethernet interface.
    ///
    /// Independent of station state; a missing Ethernet interface reports
    /// `NetifError::Unavailable`.
    fn configure_ethernet(&self, addressing: Addressing) -> Result<()>;

    /// Stage the hostname announced by the interfaces.
    ///
    /// # Errors
    ///
    /// Returns `NetifError::InvalidConfig` if the hostname exceeds driver
    /// limits.
    fn set_hostname(&self, hostname: &str) -> Result<()>;

    /// Begin associating with the given access point.
    ///
    /// The attempt runs in the driver; its outcome surfaces as a
    /// [`station_state`](NetworkInterface::station_state) change or a
    /// [`LinkEvent::StationDisconnected`](super::events::LinkEvent).
    ///
    /// # Errors
    ///
    /// Returns `NetifError` if the request cannot be handed to the driver.
    fn connect(&self, ssid: &str, password: &str) -> Result<()>;

    /// Request station teardown.
    ///
    /// `drop_config` additionally discards staged credentials. Returns true
    /// when the driver accepted the request; a matching
    /// [`LinkEvent::StationStopped`](super::events::LinkEvent) follows each
    /// accepted teardown.
    fn disconnect(&self, drop_config: bool) -> bool;

    /// Force the radio into a known-idle state.
    ///
    /// Disables any driver-internal reconnect policy so that supervision
    /// owns all reconnection decisions. Called once before supervision
    /// starts.
    ///
    /// # Errors
    ///
    /// Returns `NetifError` if the request cannot be handed to the driver.
    fn quiesce(&self) -> Result<()>;

    /// Register the sink receiving link events.
    ///
    /// The driver holds a single sink slot; a later registration replaces
    /// the earlier one. The sink is invoked from the driver's execution
    /// context (see [`LinkEventSink`]).
    fn subscribe(&self, sink: &'static dyn LinkEventSink) -> Subscription;
}
