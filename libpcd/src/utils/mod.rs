//! Small helpers shared across the crate: hex rendering for diagnostics
//! and timeout arithmetic for the PCD timer unit.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
