//! Mock network interface for testing
//!
//! This module provides a mock implementation of the network interface trait
//! that records calls for order-sensitive assertions, without requiring
//! actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! The mock uses `std` containers and is host-only.

#![cfg(any(test, feature = "mock"))]

mod netif;

pub use netif::{MockNetif, NetifCall};
