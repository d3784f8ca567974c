#[path = "../common/mod.rs"]
mod common;

use libpcd::protocol::{
    Crc16Variant, append_crc16, append_crc32, check_crc16, check_crc32, crc16, crc32,
};

fn with_crc16(hex_frame: &str, variant: Crc16Variant) -> String {
    let mut seq = hex::decode(hex_frame).unwrap();
    append_crc16(&mut seq, variant);
    hex::encode(seq)
}

#[test]
fn iso14443_annex_b_vectors() {
    assert_eq!(with_crc16("0000", Crc16Variant::A), "0000a01e");
    assert_eq!(with_crc16("1234", Crc16Variant::A), "123426cf");
    assert_eq!(with_crc16("0a123456", Crc16Variant::B), "0a1234562cf6");
}

#[test]
fn hlta_and_felica_vectors() {
    assert_eq!(with_crc16("5000", Crc16Variant::A), "500057cd");
    // FeliCa CRC goes out MSB first
    assert_eq!(crc16(b"123456789", Crc16Variant::Felica), 0x31C3);
    assert_eq!(with_crc16("313233343536373839", Crc16Variant::Felica), "31323334353637383931c3");
}

#[test]
fn crc32_matches_zlib() {
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);

    let mut seq = b"123456789".to_vec();
    append_crc32(&mut seq);
    assert_eq!(hex::encode(&seq[9..]), "2639f4cb");
    assert!(check_crc32(&mut seq, true));
    assert_eq!(seq, b"123456789");
}

#[test]
fn check_keeps_or_strips_checksum() {
    let mut seq = hex::decode("08b6dd").unwrap();
    assert!(check_crc16(&mut seq, Crc16Variant::A, false));
    assert_eq!(seq.len(), 3);
    assert!(check_crc16(&mut seq, Crc16Variant::A, true));
    assert_eq!(seq, vec![0x08]);

    let mut bad = hex::decode("08b6de").unwrap();
    assert!(!check_crc16(&mut bad, Crc16Variant::A, true));
    assert_eq!(bad, vec![0x08]);
}

#[test]
fn short_sequences_never_validate() {
    let mut one = vec![0x26];
    assert!(!check_crc16(&mut one, Crc16Variant::B, true));
    assert_eq!(one, vec![0x26]);

    let mut three = vec![0x01, 0x02, 0x03];
    assert!(!check_crc32(&mut three, true));
    assert_eq!(three.len(), 3);
}
