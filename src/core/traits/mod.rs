//! Core traits for platform-agnostic supervision logic.
//!
//! This module provides the trait abstraction that decouples the connection
//! supervisor from the synchronization mechanism protecting its state
//! (Embassy critical-section mutex on the target, RefCell on the host).
//!
//! # Features
//!
//! - **`embassy`**: Enables the Embassy implementation (`EmbassyState<T>`)
//! - The mock implementation is always available for host testing

pub mod sync;

// Re-export trait and mock implementation (always available)
pub use sync::{MockState, SharedState};

// Re-export Embassy implementation when the embassy feature is enabled
#[cfg(feature = "embassy")]
pub use sync::EmbassyState;
