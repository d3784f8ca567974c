// libpcd/src/device/config.rs

use std::time::Duration;

use crate::types::{CardProtocol, ChipKind};
use crate::utils::timeout::DEFAULT_TRANSCEIVE_TIMEOUT;

/// Start-up configuration of a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    pub chip: ChipKind,
    /// Protocol applied during initialization. `None` leaves the choice
    /// to a later `set_protocol` call.
    pub protocol: Option<CardProtocol>,
    /// Converted to timer ticks by the driver on every config reset.
    pub transceive_timeout: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chip: ChipKind::Mfrc522,
            protocol: Some(CardProtocol::A),
            transceive_timeout: DEFAULT_TRANSCEIVE_TIMEOUT,
        }
    }
}

impl ReaderConfig {
    pub fn for_chip(chip: ChipKind) -> Self {
        Self {
            chip,
            ..Self::default()
        }
    }
}
