#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libpcd::protocol::frame::{SelectFrame, bcc, nvb};

#[test]
fn full_select_frame_for_sample_uid() {
    let uid = fixtures::sample_uid4();
    let mut frame = SelectFrame::new(0x93);
    assert_eq!(frame.prepare_anticollision(0), 0);
    assert_eq!(hex::encode(frame.as_bytes()), "9320");

    frame.merge_response(&fixtures::level_bytes(uid), 0);
    assert!(frame.prepare_select());
    assert_eq!(hex::encode(frame.as_bytes()), "9370deadbeef22b99c");
    assert_eq!(frame.uid_bytes(), &uid);
}

#[test]
fn partial_byte_is_completed_by_the_card() {
    let mut frame = SelectFrame::new(0x95);
    frame.merge_response(&[0x11, 0x22, 0x33, 0x44, 0x00], 0);

    // 13 known bits: one whole UID byte plus 5 bits of the next
    assert_eq!(frame.prepare_anticollision(13), 5);
    assert_eq!(hex::encode(frame.as_bytes()), "95351102");

    frame.merge_response(&[0x20, 0x33, 0x44, 0x55], 5);
    assert_eq!(frame.uid_bytes(), &[0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn nvb_and_bcc() {
    assert_eq!(nvb(0), 0x20);
    assert_eq!(nvb(32), 0x60);
    assert_eq!(nvb(19), 0x43);
    assert_eq!(bcc(&[fixtures::CASCADE_TAG, 0x04, 0x12, 0x34]), 0xAA);
}
