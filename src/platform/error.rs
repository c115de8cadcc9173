//! Platform error types
//!
//! This module defines error types for network interface operations.

use core::fmt;

/// Result type for network interface operations
pub type Result<T> = core::result::Result<T, NetifError>;

/// Network interface errors
///
/// Implementations map driver-specific failures to these variants. The
/// supervisor never propagates them; a failed call is logged and the link is
/// recovered by the next scheduled retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetifError {
    /// Driver rejected the request or is not running
    Unavailable,
    /// Command queue to the driver is full
    Busy,
    /// Hostname or credential field exceeds driver limits
    InvalidConfig,
}

impl fmt::Display for NetifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetifError::Unavailable => write!(f, "network interface unavailable"),
            NetifError::Busy => write!(f, "network interface command queue full"),
            NetifError::InvalidConfig => write!(f, "invalid network configuration"),
        }
    }
}
