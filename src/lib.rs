#![cfg_attr(not(test), no_std)]

//! pico_link - Wi-Fi station link supervision for Raspberry Pi Pico 2 W
//!
//! This library keeps a single Wi-Fi station link (and an optional secondary
//! Ethernet interface) established: a fixed-interval retry supervisor decides
//! when to (re)connect, a link-event handler reacts to driver notifications,
//! and a platform layer binds the supervision core to the CYW43439 radio or
//! to a mock interface for host testing.

// The mock network interface uses std containers; link std for host builds
// that enable it outside cfg(test).
#[cfg(feature = "mock")]
extern crate std;

// Platform abstraction layer (network interface trait, mock, hardware binding)
pub mod platform;

// Core infrastructure (logging, shared-state traits)
pub mod core;

// Connection settings snapshot and build-time defaults
pub mod settings;

// Station link supervision (retry timing + link event handling)
pub mod supervisor;
