//! Core infrastructure
//!
//! This module contains the crate's fundamental infrastructure: the logging
//! macros and the shared-state abstraction that guards supervisor state
//! across execution contexts.

pub mod logging;
pub mod traits;
