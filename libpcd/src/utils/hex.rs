//! Hexadecimal helpers used for debugging and display purposes.

use std::fmt::Write;

/// Render each byte as a two-digit uppercase hex string.
///
/// Example: `&[0x0a, 0xff]` -> `["0A", "FF"]`
pub fn to_hex_bytes(bytes: &[u8]) -> Vec<String> {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Uppercase hex with a single space between bytes, the format used by
/// frame dumps in the log.
///
/// Example: `&[0x93, 0x20]` -> `"93 20"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    to_hex_bytes(bytes).join(" ")
}
