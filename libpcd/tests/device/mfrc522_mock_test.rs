#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libpcd::device::models::mfrc522::registers::{BIT_FRAMING_REG, FIFO_DATA_REG};
use libpcd::device::{Initialized, Reader, ReaderConfig};
use libpcd::protocol::{TransceiveOptions, TransceiveStatus};
use libpcd::test_support::mock_reader;
use libpcd::transport::MockBus;
use libpcd::{Atqa, CardProtocol, Error};

fn reader() -> (MockBus, Reader<Initialized>) {
    common::init_logging();
    let (bus, reader) = mock_reader(ReaderConfig::default());
    let reader = reader.initialize().unwrap();
    bus.clear_log();
    (bus, reader)
}

#[test]
fn reqa_goes_out_as_short_frame() {
    let (bus, mut reader) = reader();
    fixtures::script_mfrc522_reply(&bus, &fixtures::atqa_bytes(), 0);

    let atqa = reader.request(false).unwrap();
    assert_eq!(atqa, Some(Atqa::from_bytes(fixtures::atqa_bytes())));
    assert_eq!(bus.writes_to(FIFO_DATA_REG), vec![vec![0x26]]);
    // 7 valid bits, then the same with StartSend
    assert_eq!(bus.writes_to(BIT_FRAMING_REG), vec![vec![0x07], vec![0x87]]);
}

#[test]
fn no_card_answers_request() {
    let (bus, mut reader) = reader();
    fixtures::script_mfrc522_timeout(&bus);
    assert_eq!(reader.request(false).unwrap(), None);
}

#[test]
fn activate_over_the_register_bus() {
    let (bus, mut reader) = reader();
    let uid = fixtures::sample_uid4();
    fixtures::script_mfrc522_reply(&bus, &fixtures::atqa_bytes(), 0);
    fixtures::script_mfrc522_reply(&bus, &fixtures::level_bytes(uid), 0);
    fixtures::script_mfrc522_reply(&bus, &fixtures::sak_bytes(0x08), 0);

    let card = reader.activate(false).unwrap().expect("card present");
    assert_eq!(card.uid().as_bytes(), &uid);
    assert_eq!(card.sak().value(), 0x08);

    let frames: Vec<String> = bus.writes_to(FIFO_DATA_REG).iter().map(hex::encode).collect();
    assert_eq!(frames, vec!["26", "9320", "9370deadbeef22b99c"]);
}

#[test]
fn halt_succeeds_on_silence() {
    let (bus, mut reader) = reader();
    fixtures::script_mfrc522_timeout(&bus);

    assert!(reader.halt().unwrap());
    assert_eq!(bus.writes_to(FIFO_DATA_REG), vec![vec![0x50, 0x00, 0x57, 0xCD]]);
}

#[test]
fn raw_transceive_reports_status() {
    let (bus, mut reader) = reader();
    fixtures::script_mfrc522_timeout(&bus);
    let r = reader.transceive(&[0x30, 0x04], TransceiveOptions::default()).unwrap();
    assert_eq!(r.status, TransceiveStatus::PiccTimeout);
    assert!(r.data.is_empty());
}

#[test]
fn type_b_is_rejected_before_any_register_access() {
    let (bus, mut reader) = reader();
    assert!(matches!(
        reader.set_protocol(CardProtocol::B),
        Err(Error::UnsupportedProtocol(_))
    ));
    assert!(bus.writes().is_empty());
    assert!(bus.reads().is_empty());
}
