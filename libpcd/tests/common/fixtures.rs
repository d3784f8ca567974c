// fixtures.rs: card replies and register scripts shared by the tests

use libpcd::device::models::mfrc522::registers::{
    COM_IRQ_REG, CONTROL_REG, ERROR_REG, FIFO_DATA_REG, FIFO_LEVEL_REG,
};
use libpcd::protocol::frame::bcc;
use libpcd::protocol::{Crc16Variant, Transceived, append_crc16};
use libpcd::transport::MockBus;

pub const CASCADE_TAG: u8 = 0x88;

pub fn sample_uid4() -> [u8; 4] {
    [0xDE, 0xAD, 0xBE, 0xEF]
}

pub fn sample_uid7() -> [u8; 7] {
    [0x04, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC]
}

/// ATQA of a MIFARE Classic 1K.
pub fn atqa_bytes() -> [u8; 2] {
    [0x04, 0x00]
}

/// UID CLn part plus its BCC.
pub fn level_bytes(part: [u8; 4]) -> Vec<u8> {
    let mut data = part.to_vec();
    data.push(bcc(&part));
    data
}

/// SAK followed by CRC_A.
pub fn sak_bytes(sak: u8) -> Vec<u8> {
    let mut data = vec![sak];
    append_crc16(&mut data, Crc16Variant::A);
    data
}

/// Card-side replies for a collision-free select of `uid` (4 or 7 bytes).
pub fn select_replies(uid: &[u8], final_sak: u8) -> Vec<Transceived> {
    let mut replies = Vec::new();
    match uid.len() {
        4 => {
            replies.push(Transceived::ok(level_bytes([uid[0], uid[1], uid[2], uid[3]]), 0));
        }
        7 => {
            replies.push(Transceived::ok(
                level_bytes([CASCADE_TAG, uid[0], uid[1], uid[2]]),
                0,
            ));
            replies.push(Transceived::ok(sak_bytes(0x04), 0));
            replies.push(Transceived::ok(level_bytes([uid[3], uid[4], uid[5], uid[6]]), 0));
        }
        other => panic!("fixture does not cover {}-byte UIDs", other),
    }
    replies.push(Transceived::ok(sak_bytes(final_sak), 0));
    replies
}

/// Queue MFRC522 register reads so the next Transceive completes with
/// `data` in the FIFO and no error flags.
pub fn script_mfrc522_reply(bus: &MockBus, data: &[u8], valid_bits: u8) {
    bus.script_reads(COM_IRQ_REG, &[0x30]);
    bus.script_reads(ERROR_REG, &[0x00]);
    bus.script_reads(FIFO_LEVEL_REG, &[data.len() as u8]);
    bus.script_reads(FIFO_DATA_REG, data);
    bus.script_reads(CONTROL_REG, &[valid_bits]);
}

/// Queue a reply that never comes: the timer IRQ fires first.
pub fn script_mfrc522_timeout(bus: &MockBus) {
    bus.script_reads(COM_IRQ_REG, &[0x00, 0x01]);
}
