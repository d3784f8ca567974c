// libpcd/src/types.rs

use crate::Error;
use derive_more::Display;
use std::convert::TryFrom;

/// Supported PCD chip families
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChipKind {
    #[display(fmt = "MFRC522")]
    Mfrc522,
    #[display(fmt = "PN512")]
    Pn512,
}

impl Default for ChipKind {
    fn default() -> Self {
        ChipKind::Mfrc522
    }
}

/// Card protocol tags. `Mifare` marks support for the MIFARE Crypto1
/// session and is a capability only; it cannot be selected as the
/// active framing protocol.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardProtocol {
    #[display(fmt = "ISO/IEC 14443 Type A")]
    A,
    #[display(fmt = "ISO/IEC 14443 Type B")]
    B,
    #[display(fmt = "FeliCa")]
    Felica,
    #[display(fmt = "MIFARE Crypto1")]
    Mifare,
}

/// RF baud rates. The discriminant is the value of the TxSpeed/RxSpeed
/// field of the mode registers.
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaudRate {
    #[display(fmt = "106 kBd")]
    Kbd106 = 0,
    #[display(fmt = "212 kBd")]
    Kbd212 = 1,
    #[display(fmt = "424 kBd")]
    Kbd424 = 2,
    #[display(fmt = "848 kBd")]
    Kbd848 = 3,
    #[display(fmt = "1696 kBd")]
    Kbd1696 = 4,
    #[display(fmt = "3392 kBd")]
    Kbd3392 = 5,
}

impl BaudRate {
    pub fn from_kbd(kbd: u32) -> Option<Self> {
        match kbd {
            106 => Some(Self::Kbd106),
            212 => Some(Self::Kbd212),
            424 => Some(Self::Kbd424),
            848 => Some(Self::Kbd848),
            1696 => Some(Self::Kbd1696),
            3392 => Some(Self::Kbd3392),
            _ => None,
        }
    }

    pub fn kbd(self) -> u32 {
        match self {
            Self::Kbd106 => 106,
            Self::Kbd212 => 212,
            Self::Kbd424 => 424,
            Self::Kbd848 => 848,
            Self::Kbd1696 => 1696,
            Self::Kbd3392 => 3392,
        }
    }

    /// Speed field index as programmed into TxModeReg/RxModeReg.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Kbd106),
            1 => Some(Self::Kbd212),
            2 => Some(Self::Kbd424),
            3 => Some(Self::Kbd848),
            4 => Some(Self::Kbd1696),
            5 => Some(Self::Kbd3392),
            _ => None,
        }
    }
}

/// Transmit or receive path of the contactless UART
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[display(fmt = "tx")]
    Tx,
    #[display(fmt = "rx")]
    Rx,
}

/// Card UID (4, 7 or 10 bytes), cascade tags removed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(Vec<u8>);

impl Uid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            4 | 7 | 10 => Ok(Self(bytes.to_vec())),
            n => Err(Error::UnexpectedData(format!(
                "UID must be 4, 7 or 10 bytes, got {}",
                n
            ))),
        }
    }
}

impl TryFrom<Vec<u8>> for Uid {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Uid::try_from(bytes.as_slice())
    }
}

/// Select Acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sak(u8);

impl Sak {
    pub const CASCADE_BIT: u8 = 0x04;

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// UID not complete, another cascade level follows.
    pub fn has_more_levels(&self) -> bool {
        self.0 & Self::CASCADE_BIT != 0
    }

    /// PICC is compliant with ISO/IEC 14443-4.
    pub fn is_iso14443_4(&self) -> bool {
        !self.has_more_levels() && self.0 & 0x20 != 0
    }
}

/// Answer To reQuest, Type A (2 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atqa([u8; 2]);

impl Atqa {
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Atqa {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 2 {
            return Err(Error::UnexpectedData(format!(
                "ATQA must be 2 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self([bytes[0], bytes[1]]))
    }
}
