// libpcd/src/prelude.rs

pub use crate::card::{Card, MifareKey};
pub use crate::device::{ChipDriver, ReaderBuilder, ReaderConfig};
pub use crate::device::{Initialized, Reader, Uninitialized};
pub use crate::protocol::{TransceiveOptions, TransceiveStatus, Transceived};
pub use crate::transport::RegisterBus;
pub use crate::{
    Atqa, BaudRate, CardProtocol, ChipKind, Direction, Error, Result, Sak, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
