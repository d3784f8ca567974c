// libpcd/src/protocol/codec.rs

//! Little-endian integer packing with explicit byte widths, plus the
//! small byte-sequence helpers card protocols build frames with.

use crate::{Error, Result};

/// Widest integer the codec packs; values are carried as 128-bit.
pub const MAX_WIDTH: usize = 16;

fn check_width(width: usize) -> Result<()> {
    if width > MAX_WIDTH {
        return Err(Error::Usage(format!(
            "byte width {} exceeds {} bytes",
            width, MAX_WIDTH
        )));
    }
    Ok(())
}

/// Does a magnitude fit into `width` bytes?
fn fits(magnitude: u128, width: usize) -> bool {
    width >= MAX_WIDTH || magnitude < (1u128 << (8 * width))
}

fn push_le(seq: &mut Vec<u8>, mut value: u128, width: usize) {
    for _ in 0..width {
        seq.push((value & 0xFF) as u8);
        value >>= 8;
    }
}

/// Append `value` little-endian in exactly `width` bytes.
///
/// Fails with [`Error::OutOfRange`] for negative values and values that
/// need more than `width` bytes.
pub fn append_uint(seq: &mut Vec<u8>, value: i128, width: usize) -> Result<()> {
    check_width(width)?;
    if value < 0 || !fits(value as u128, width) {
        return Err(Error::OutOfRange { value, width });
    }
    push_le(seq, value as u128, width);
    Ok(())
}

/// Interpret `seq` as a little-endian unsigned integer.
pub fn to_uint(seq: &[u8]) -> Result<u128> {
    check_width(seq.len())?;
    Ok(seq
        .iter()
        .enumerate()
        .fold(0u128, |acc, (i, &b)| acc | (u128::from(b) << (8 * i))))
}

/// Append `value` in `width` bytes: the low `8 * width - 1` bits hold the
/// two's-complement payload and the top bit of the last byte holds the
/// sign. The magnitude bound is the same as [`append_uint`].
pub fn append_sint(seq: &mut Vec<u8>, value: i128, width: usize) -> Result<()> {
    check_width(width)?;
    if width == 0 || !fits(value.unsigned_abs(), width) {
        return Err(Error::OutOfRange { value, width });
    }
    let payload_mask = (1u128 << (8 * width - 1)) - 1;
    push_le(seq, (value as u128) & payload_mask, width);
    if value < 0 {
        if let Some(last) = seq.last_mut() {
            *last |= 0x80;
        }
    }
    Ok(())
}

/// Inverse of [`append_sint`]: sign-extends from the top bit of the last
/// byte.
pub fn to_sint(seq: &[u8]) -> Result<i128> {
    let raw = to_uint(seq)?;
    match seq.last() {
        Some(&last) if last & 0x80 != 0 => {
            let payload_mask = (1u128 << (8 * seq.len() - 1)) - 1;
            Ok((!payload_mask | raw) as i128)
        }
        _ => Ok(raw as i128),
    }
}

/// Element-wise XOR, truncated to the shorter input.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn append_uint_little_endian() {
        let mut seq = vec![0xAA];
        append_uint(&mut seq, 0x0102_03, 3).unwrap();
        assert_eq!(seq, vec![0xAA, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn append_uint_range_errors() {
        let mut seq = Vec::new();
        assert!(matches!(
            append_uint(&mut seq, 256, 1),
            Err(Error::OutOfRange { value: 256, width: 1 })
        ));
        assert!(matches!(
            append_uint(&mut seq, -1, 4),
            Err(Error::OutOfRange { .. })
        ));
        assert!(seq.is_empty());
        assert!(append_uint(&mut seq, 0, 17).unwrap_err().is_usage());
    }

    #[test]
    fn append_uint_full_width() {
        let mut seq = Vec::new();
        append_uint(&mut seq, 0xFFFF_FFFF, 4).unwrap();
        assert_eq!(seq, vec![0xFF; 4]);
    }

    #[test]
    fn signed_encoding_uses_top_bit() {
        let mut seq = Vec::new();
        append_sint(&mut seq, -1, 2).unwrap();
        assert_eq!(seq, vec![0xFF, 0xFF]);

        let mut seq = Vec::new();
        append_sint(&mut seq, -2, 4).unwrap();
        assert_eq!(seq, vec![0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(to_sint(&seq).unwrap(), -2);

        let mut seq = Vec::new();
        append_sint(&mut seq, 0x7F, 1).unwrap();
        assert_eq!(to_sint(&seq).unwrap(), 0x7F);
    }

    #[test]
    fn signed_magnitude_bound() {
        let mut seq = Vec::new();
        assert!(append_sint(&mut seq, -256, 1).is_err());
        assert!(append_sint(&mut seq, 0, 0).is_err());
    }

    #[test]
    fn to_uint_empty_is_zero() {
        assert_eq!(to_uint(&[]).unwrap(), 0);
        assert_eq!(to_sint(&[]).unwrap(), 0);
    }

    #[test]
    fn xor_truncates() {
        assert_eq!(xor(&[0xFF, 0x0F, 0x01], &[0x0F, 0x0F]), vec![0xF0, 0x00]);
        assert!(xor(&[], &[1, 2]).is_empty());
    }

    proptest! {
        #[test]
        fn uint_roundtrip(width in 1usize..=4, seed in any::<u32>()) {
            let value = u128::from(seed) % (1u128 << (8 * width));
            let mut seq = Vec::new();
            append_uint(&mut seq, value as i128, width).unwrap();
            prop_assert_eq!(seq.len(), width);
            prop_assert_eq!(to_uint(&seq).unwrap(), value);
        }

        #[test]
        fn sint_roundtrip(width in 1usize..=4, seed in any::<i64>()) {
            let half = 1i128 << (8 * width - 1);
            let value = i128::from(seed).rem_euclid(2 * half) - half;
            let mut seq = Vec::new();
            append_sint(&mut seq, value, width).unwrap();
            prop_assert_eq!(seq.len(), width);
            prop_assert_eq!(to_sint(&seq).unwrap(), value);
        }
    }
}
