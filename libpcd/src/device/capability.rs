// libpcd/src/device/capability.rs

//! Static capability table per chip family.
//!
//! Every selection of a card protocol or baud rate is checked against
//! this table before any register is touched.

use crate::types::{BaudRate, CardProtocol, ChipKind};
use crate::{Error, Result};

/// What a chip family supports. Declared once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub protocols: &'static [CardProtocol],
    pub baud_rates: &'static [BaudRate],
    /// FIFO depth in bytes.
    pub buffer_size: usize,
}

pub const MFRC522: Capabilities = Capabilities {
    protocols: &[CardProtocol::A, CardProtocol::Mifare],
    baud_rates: &[
        BaudRate::Kbd106,
        BaudRate::Kbd212,
        BaudRate::Kbd424,
        BaudRate::Kbd848,
    ],
    buffer_size: 64,
};

pub const PN512: Capabilities = Capabilities {
    protocols: &[
        CardProtocol::A,
        CardProtocol::B,
        CardProtocol::Felica,
        CardProtocol::Mifare,
    ],
    baud_rates: &[
        BaudRate::Kbd106,
        BaudRate::Kbd212,
        BaudRate::Kbd424,
        BaudRate::Kbd848,
        BaudRate::Kbd1696,
        BaudRate::Kbd3392,
    ],
    buffer_size: 64,
};

impl Capabilities {
    pub fn supports_protocol(&self, protocol: CardProtocol) -> bool {
        self.protocols.contains(&protocol)
    }

    pub fn supports_baud_rate(&self, rate: BaudRate) -> bool {
        self.baud_rates.contains(&rate)
    }
}

impl ChipKind {
    pub fn capabilities(self) -> &'static Capabilities {
        match self {
            ChipKind::Mfrc522 => &MFRC522,
            ChipKind::Pn512 => &PN512,
        }
    }
}

pub fn protocol(chip: ChipKind) -> &'static [CardProtocol] {
    chip.capabilities().protocols
}

pub fn baud_rate(chip: ChipKind) -> &'static [BaudRate] {
    chip.capabilities().baud_rates
}

pub fn buffer_size(chip: ChipKind) -> usize {
    chip.capabilities().buffer_size
}

pub fn supports_protocol(chip: ChipKind, protocol: CardProtocol) -> bool {
    chip.capabilities().supports_protocol(protocol)
}

pub fn supports_baud_rate(chip: ChipKind, rate: BaudRate) -> bool {
    chip.capabilities().supports_baud_rate(rate)
}

/// Fail with `UnsupportedProtocol` unless `chip` handles `protocol`.
pub fn ensure_protocol(chip: ChipKind, protocol: CardProtocol) -> Result<()> {
    if supports_protocol(chip, protocol) {
        Ok(())
    } else {
        Err(Error::UnsupportedProtocol(format!(
            "{} does not support {}",
            chip, protocol
        )))
    }
}

/// Fail with `UnsupportedProtocol` unless `chip` handles `rate`.
pub fn ensure_baud_rate(chip: ChipKind, rate: BaudRate) -> Result<()> {
    if supports_baud_rate(chip, rate) {
        Ok(())
    } else {
        Err(Error::UnsupportedProtocol(format!(
            "{} does not support {}",
            chip, rate
        )))
    }
}
