//! RP2350 network binding for the Raspberry Pi Pico 2 W
//!
//! Concrete [`NetworkInterface`](crate::platform::NetworkInterface)
//! implementation on top of the CYW43439 radio, using `cyw43` for the chip
//! driver and `embassy-net` for the stack.
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2_w` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! pico_link = { version = "0.1", features = ["pico2_w"] }
//! ```
//!
//! # Composition
//!
//! ```ignore
//! static NETIF: Cyw43Netif = Cyw43Netif::new();
//!
//! let (control, stack) = network::bring_up(
//!     spawner, fw, clm, p.PIN_23, p.PIN_24, p.PIN_25, p.PIN_29, p.PIO0, p.DMA_CH0,
//! )
//! .await;
//! spawner
//!     .spawn(netif_driver_task(&NETIF, control, stack, None))
//!     .unwrap();
//! ```

mod netif;
pub mod network;

pub use netif::{netif_driver_task, Cyw43Netif};
