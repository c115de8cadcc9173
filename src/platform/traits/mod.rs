//! Platform abstraction traits
//!
//! This module defines the traits that network interface implementations
//! must provide.

pub mod events;
pub mod netif;

// Re-export trait interfaces
pub use events::{LinkEvent, LinkEventSink, Subscription};
pub use netif::{Addressing, NetworkInterface, StaticAddressing, StationState};
