// libpcd/src/protocol/exchange.rs

//! Result types of a single transceive call.

use derive_more::Display;

/// Terminal status of one transceive call.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransceiveStatus {
    #[display(fmt = "ok")]
    Ok,
    /// The card did not answer before the PCD timer expired.
    #[display(fmt = "PICC timeout")]
    PiccTimeout,
    /// The poll budget ran out before the chip signalled completion.
    #[display(fmt = "PCD timeout")]
    PcdTimeout,
    #[display(fmt = "collision")]
    Collision,
    #[display(fmt = "CRC error")]
    CrcError,
    #[display(fmt = "parity error")]
    ParityError,
    #[display(fmt = "protocol error")]
    ProtocolError,
    #[display(fmt = "buffer overflow")]
    BufferOverflow,
}

impl TransceiveStatus {
    pub fn is_ok(&self) -> bool {
        *self == TransceiveStatus::Ok
    }
}

/// Where the first bit collision happened. `position` is 1-based
/// (1..=32) within the UID+BCC field and only meaningful when `valid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionDetail {
    pub valid: bool,
    pub position: u8,
}

impl CollisionDetail {
    pub fn at(position: u8) -> Self {
        Self {
            valid: true,
            position,
        }
    }

    pub fn unknown() -> Self {
        Self {
            valid: false,
            position: 0,
        }
    }
}

/// Per-call framing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransceiveOptions {
    /// Append a CRC to the outgoing frame and verify the reply's CRC.
    pub crc: bool,
    /// Bit position (0..=7) where the first received bit is stored.
    pub rx_align: u8,
    /// Number of valid bits (0..=7) in the last transmitted byte, 0 = all 8.
    pub tx_lastbits: u8,
}

impl Default for TransceiveOptions {
    fn default() -> Self {
        Self {
            crc: true,
            rx_align: 0,
            tx_lastbits: 0,
        }
    }
}

impl TransceiveOptions {
    /// No CRC, whole bytes.
    pub fn raw() -> Self {
        Self {
            crc: false,
            ..Self::default()
        }
    }

    /// No CRC, bit-oriented anticollision framing.
    pub fn bit_oriented(rx_align: u8, tx_lastbits: u8) -> Self {
        Self {
            crc: false,
            rx_align,
            tx_lastbits,
        }
    }
}

/// Outcome of one transceive: status, received bytes and the number of
/// valid bits in the final received byte (0 = all 8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transceived {
    pub status: TransceiveStatus,
    pub data: Vec<u8>,
    pub valid_bits: u8,
}

impl Transceived {
    pub fn new(status: TransceiveStatus, data: Vec<u8>, valid_bits: u8) -> Self {
        Self {
            status,
            data,
            valid_bits,
        }
    }

    /// A status-only outcome carrying no data.
    pub fn status(status: TransceiveStatus) -> Self {
        Self::new(status, Vec::new(), 0)
    }

    pub fn ok(data: Vec<u8>, valid_bits: u8) -> Self {
        Self::new(TransceiveStatus::Ok, data, valid_bits)
    }
}
