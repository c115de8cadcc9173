//! Platform abstraction layer
//!
//! This module provides the network interface abstraction: the driver-facing
//! trait surface, a mock implementation for host testing, and the CYW43439
//! hardware binding. All platform-specific code is isolated to this module.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2_w")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{NetifError, Result};
pub use traits::{
    Addressing, LinkEvent, LinkEventSink, NetworkInterface, StaticAddressing, StationState,
    Subscription,
};
