#[path = "../common/mod.rs"]
mod common;

use libpcd::Error;
use libpcd::protocol::{append_sint, append_uint, to_sint, to_uint, xor};

#[test]
fn builds_a_value_block_style_frame() {
    // value, inverted value, value: the shape of a MIFARE value block
    let mut block = Vec::new();
    append_sint(&mut block, 100, 4).unwrap();
    let inverted = xor(&block, &[0xFF; 4]);
    block.extend_from_slice(&inverted);
    append_sint(&mut block, 100, 4).unwrap();

    assert_eq!(hex::encode(&block), "640000009bffffff64000000");
    assert_eq!(to_sint(&block[..4]).unwrap(), 100);
    assert_eq!(to_uint(&block[4..8]).unwrap(), 0xFFFF_FF9B);
}

#[test]
fn mixed_width_packing() {
    let mut seq = Vec::new();
    append_uint(&mut seq, 0x12, 1).unwrap();
    append_uint(&mut seq, 0x3456, 2).unwrap();
    append_uint(&mut seq, 0, 0).unwrap();
    assert_eq!(hex::encode(&seq), "125634");
}

#[test]
fn out_of_range_reports_value_and_width() {
    let mut seq = Vec::new();
    let err = append_uint(&mut seq, 0x1_0000, 2).unwrap_err();
    assert!(err.is_usage());
    assert_eq!(err.to_string(), "value 65536 does not fit in 2 byte(s)");
    assert!(matches!(
        append_sint(&mut seq, -70000, 2),
        Err(Error::OutOfRange { value: -70000, width: 2 })
    ));
    assert!(seq.is_empty());
}

#[test]
fn wide_integers_round_trip() {
    let mut seq = Vec::new();
    append_uint(&mut seq, i128::MAX, 16).unwrap();
    assert_eq!(seq.len(), 16);
    assert_eq!(to_uint(&seq).unwrap(), i128::MAX as u128);
    assert!(to_uint(&[0u8; 17]).is_err());
}
