#[path = "../common/mod.rs"]
mod common;

use libpcd::device::{Reader, ReaderBuilder, ReaderConfig};
use libpcd::test_support::mock_reader;
use libpcd::transport::MockBus;
use libpcd::{CardProtocol, ChipKind, Error};

#[test]
fn initialize_transitions_and_chip_kind() {
    common::init_logging();
    let (bus, reader) = mock_reader(ReaderConfig::default());

    // Uninitialized reader exposes the chip kind
    assert_eq!(reader.chip_kind(), ChipKind::Mfrc522);
    assert_eq!(bus.startup_count(), 0);

    let mut reader = reader.initialize().unwrap();
    assert_eq!(reader.chip_kind(), ChipKind::Mfrc522);
    assert_eq!(bus.startup_count(), 1);
    assert_eq!(reader.protocol().unwrap(), CardProtocol::A);

    bus.set_register(0x37, 0x92);
    assert_eq!(reader.driver_mut().version().unwrap(), 0x92);
}

#[test]
fn antenna_is_on_after_initialize() {
    let (bus, reader) = mock_reader(ReaderConfig::default());
    let _reader = reader.initialize().unwrap();
    // TxControlReg: Tx1RFEn | Tx2RFEn
    assert_eq!(bus.register(0x14) & 0x03, 0x03);
}

#[test]
fn bus_errors_surface_from_initialize() {
    let bus = MockBus::new();
    bus.fail_reads();
    let reader = Reader::new(Box::new(bus), ReaderConfig::default());
    assert!(matches!(reader.initialize(), Err(Error::Bus(_))));
}

#[test]
fn builder_requires_a_bus() {
    let err = ReaderBuilder::new().chip(ChipKind::Pn512).build().err();
    assert!(matches!(err, Some(Error::BusNotConfigured)));
}
