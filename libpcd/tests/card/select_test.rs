#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libpcd::card::MifareKey;
use libpcd::protocol::Transceived;
use libpcd::test_support::scripted_reader;
use libpcd::{ChipKind, Error};

#[test]
fn double_size_uid_is_assembled_without_cascade_tag() -> anyhow::Result<()> {
    common::init_logging();
    let (chip, reader) = scripted_reader(ChipKind::Mfrc522);
    let mut reader = reader.initialize()?;

    chip.push_reply(Transceived::ok(vec![0x44, 0x00], 0));
    for reply in fixtures::select_replies(&fixtures::sample_uid7(), 0x00) {
        chip.push_reply(reply);
    }

    let card = reader.activate(false)?.expect("card present");
    assert_eq!(card.uid().as_bytes(), &fixtures::sample_uid7());
    assert_eq!(card.uid().to_hex(), "04123456789abc");
    assert!(!card.sak().has_more_levels());

    let sent: Vec<String> = chip.sent().iter().map(|(f, _)| hex::encode(f)).collect();
    assert_eq!(sent[1], "9320");
    assert!(sent[2].starts_with("937088041234aa"));
    assert_eq!(sent[3], "9520");
    assert!(sent[4].starts_with("95705678"));
    assert_eq!(chip.replies_left(), 0);
    Ok(())
}

#[test]
fn wakeup_then_halt() -> anyhow::Result<()> {
    let (chip, reader) = scripted_reader(ChipKind::Pn512);
    let mut reader = reader.initialize()?;

    chip.push_reply(Transceived::ok(fixtures::atqa_bytes().to_vec(), 0));
    assert!(reader.wakeup()?.is_some());
    assert_eq!(chip.sent()[0].0, vec![0x52]);

    // Nothing queued: the card stays silent, which is what HLTA wants
    assert!(reader.halt()?);
    assert_eq!(chip.sent()[1].0, vec![0x50, 0x00]);
    Ok(())
}

#[test]
fn authenticate_selected_card() -> anyhow::Result<()> {
    let (chip, reader) = scripted_reader(ChipKind::Mfrc522);
    let mut reader = reader.initialize()?;
    chip.push_reply(Transceived::ok(fixtures::atqa_bytes().to_vec(), 0));
    for reply in fixtures::select_replies(&fixtures::sample_uid4(), 0x08) {
        chip.push_reply(reply);
    }
    let card = reader.activate(false)?.expect("card present");

    chip.push_reply(Transceived::ok(Vec::new(), 0));
    assert!(reader.mifare_authenticate(MifareKey::A, 4, &[0xFF; 6], &card)?);
    let (frame, _) = chip.sent().pop().expect("auth frame");
    assert_eq!(hex::encode(frame), "6004ffffffffffffdeadbeef");
    reader.mifare_deauthenticate()?;
    Ok(())
}

#[test]
fn timeout_during_select_is_an_error() {
    let (_chip, reader) = scripted_reader(ChipKind::Mfrc522);
    let mut reader = reader.initialize().unwrap();
    // Empty script: the anticollision frame times out
    let err = reader.select(false).unwrap_err();
    assert!(matches!(err, Error::PiccTimeout));
    assert!(err.is_communication());
}
