// libpcd/src/lib.rs

//! libpcd
//!
//! Pure Rust core for MFRC522 and PN512 contactless front-ends: register
//! level transceive, ISO/IEC 14443 checksums and the Type A
//! request/anticollision/select sequence. The host bus is supplied by the
//! caller through [`transport::RegisterBus`].

pub mod card;
pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Error, Result and the tag/newtype values live at the crate root as well
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
