#[path = "../common/mod.rs"]
mod common;

use libpcd::device::ReaderBuilder;
use libpcd::protocol::{TransceiveOptions, Transceived};
use libpcd::transport::MockBus;
use libpcd::{CardProtocol, ChipKind, Error};

#[test]
fn pn512_comes_up_in_type_a() -> anyhow::Result<()> {
    common::init_logging();
    let bus = MockBus::new();
    let reader = ReaderBuilder::new()
        .with_bus(Box::new(bus.clone()))
        .chip(ChipKind::Pn512)
        .build()?;

    assert_eq!(reader.protocol()?, CardProtocol::A);
    // Every access went through the page register
    assert!(bus.writes_to(0x00).iter().all(|w| w[0] & 0x80 != 0));
    Ok(())
}

#[test]
fn felica_frames_use_builtin_crc() -> anyhow::Result<()> {
    let bus = MockBus::new();
    let mut reader = ReaderBuilder::new()
        .with_bus(Box::new(bus.clone()))
        .chip(ChipKind::Pn512)
        .build()?;
    reader.set_protocol(CardProtocol::Felica)?;
    assert!(reader.driver().state().built_in_crc);

    // Page 0 registers: ComIrq, Error, FIFOLevel, FIFOData, Control
    bus.clear_log();
    bus.script_reads(0x04, &[0x30]);
    bus.script_reads(0x06, &[0x00]);
    bus.script_reads(0x0A, &[0x02]);
    bus.script_reads(0x09, &[0x12, 0x01]);
    bus.script_reads(0x0C, &[0x00]);

    let poll = [0x06, 0x00, 0xFF, 0xFF, 0x00, 0x00];
    let reply = reader.transceive(&poll, TransceiveOptions::default())?;
    assert_eq!(reply, Transceived::ok(vec![0x12, 0x01], 0));
    // Chip appends the CRC itself
    assert_eq!(bus.writes_to(0x09), vec![poll.to_vec()]);

    // Disabling CRC conflicts with the built-in CRC at 212 kBd
    let err = reader.transceive(&poll, TransceiveOptions::raw()).unwrap_err();
    assert!(err.is_usage());
    Ok(())
}

#[test]
fn felica_has_no_activation_sequence() -> anyhow::Result<()> {
    let mut reader = ReaderBuilder::new()
        .with_bus(Box::new(MockBus::new()))
        .chip(ChipKind::Pn512)
        .protocol(Some(CardProtocol::Felica))
        .build()?;
    assert!(matches!(
        reader.request(false),
        Err(Error::UnsupportedProtocol(_))
    ));
    Ok(())
}
