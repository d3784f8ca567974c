// libpcd/src/protocol/frame.rs

use crate::constants::NVB_FULL_SELECT;
use crate::protocol::checksum::{Crc16Variant, append_crc16};

/// Working buffer of one ISO/IEC 14443-3 cascade level.
///
/// Layout: `[SEL] [NVB] [UID0..UID3 or CT+UID0..UID2] [BCC] [CRC_A(2)]`.
/// BCC and CRC_A are only present for a full select, i.e. once all 32
/// UID+BCC bits of the level are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFrame {
    bytes: Vec<u8>,
}

/// Length of SEL + NVB + four UID bytes.
const PREFIX_LEN: usize = 6;

impl SelectFrame {
    pub fn new(cascade_level: u8) -> Self {
        Self {
            bytes: vec![cascade_level, 0x00],
        }
    }

    pub fn cascade_level(&self) -> u8 {
        self.bytes[0]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shape the buffer into an ANTICOLLISION frame carrying the first
    /// `known_bits` UID bits. Returns the number of valid bits in the
    /// last byte.
    pub fn prepare_anticollision(&mut self, known_bits: u8) -> u8 {
        let tx_lastbits = known_bits % 8;
        let whole_bytes = 2 + usize::from(known_bits / 8);
        let len = whole_bytes + usize::from(tx_lastbits > 0);
        self.bytes.resize(len, 0x00);
        self.bytes[1] = nvb(known_bits);
        if tx_lastbits > 0 {
            // Bits past the known prefix are filled in by the card
            self.bytes[len - 1] &= (1u8 << tx_lastbits) - 1;
        }
        tx_lastbits
    }

    /// Shape the buffer into a full SELECT frame: complete NVB, BCC over
    /// the four UID bytes and CRC_A. Returns false, leaving the buffer
    /// untouched, when fewer than four UID bytes are known.
    pub fn prepare_select(&mut self) -> bool {
        if self.bytes.len() < PREFIX_LEN {
            return false;
        }
        self.bytes.truncate(PREFIX_LEN);
        self.bytes[1] = NVB_FULL_SELECT;
        let check = bcc(&self.bytes[2..PREFIX_LEN]);
        self.bytes.push(check);
        append_crc16(&mut self.bytes, Crc16Variant::A);
        true
    }

    /// Merge an anticollision response. When the frame ended in a
    /// partial byte the first received byte completes it.
    pub fn merge_response(&mut self, received: &[u8], tx_lastbits: u8) {
        let mut rest = received;
        if tx_lastbits != 0 {
            if let (Some(last), Some((first, tail))) = (self.bytes.last_mut(), rest.split_first())
            {
                *last |= *first;
                rest = tail;
            }
        }
        self.bytes.extend_from_slice(rest);
    }

    /// Set the UID bit at 1-based `position` so the next round follows
    /// the `1` branch of the collision.
    pub fn mark_collision(&mut self, position: u8) {
        let bit = usize::from(position.saturating_sub(1));
        let index = 2 + bit / 8;
        if self.bytes.len() <= index {
            self.bytes.resize(index + 1, 0x00);
        }
        self.bytes[index] |= 1 << (bit % 8);
    }

    /// The four UID bytes of this level (may start with the cascade tag).
    pub fn uid_bytes(&self) -> &[u8] {
        let end = self.bytes.len().min(PREFIX_LEN);
        &self.bytes[2.min(end)..end]
    }
}

/// Number of Valid Bits byte: whole bytes (SEL and NVB included) in the
/// high nibble, extra bits in the low nibble.
pub fn nvb(known_bits: u8) -> u8 {
    let whole_bytes = 2 + known_bits / 8;
    (whole_bytes << 4) | (known_bits % 8)
}

/// Block Check Character: XOR of the UID bytes.
pub fn bcc(uid: &[u8]) -> u8 {
    uid.iter().fold(0u8, |acc, &b| acc ^ b)
}
