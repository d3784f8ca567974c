#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libpcd::card::type_a;
use libpcd::protocol::{CollisionDetail, TransceiveOptions, TransceiveStatus, Transceived};
use libpcd::test_support::ScriptedChip;
use libpcd::{ChipKind, Error};

#[test]
fn two_cards_resolve_to_the_one_branch() {
    common::init_logging();
    let mut chip = ScriptedChip::new(ChipKind::Mfrc522);

    // Cards differ first in bit 1 of UID0; bits after the collision are junk
    chip.push_reply(Transceived::new(
        TransceiveStatus::Collision,
        vec![0x01, 0xFF, 0xFF, 0xFF, 0xFF],
        0,
    ));
    chip.push_collision(CollisionDetail::at(2));
    // Second round sends 2 known bits; the reply starts at bit 2 of UID0
    chip.push_reply(Transceived::ok(vec![0x00, 0x10, 0x20, 0x30, 0x03], 0));
    chip.push_reply(Transceived::ok(fixtures::sak_bytes(0x08), 0));

    let (uid, sak) = type_a::select(&mut chip, false).unwrap();
    assert_eq!(uid.as_bytes(), &[0x03, 0x10, 0x20, 0x30]);
    assert_eq!(sak.value(), 0x08);

    let sent = chip.sent();
    assert_eq!(sent[1].0, vec![0x93, 0x22, 0x03]);
    assert_eq!(sent[1].1, TransceiveOptions::bit_oriented(2, 2));
    assert_eq!(hex::encode(&sent[2].0[..7]), "93700310203003");
}

#[test]
fn collisions_fail_fast_when_anticollision_is_disabled() {
    let mut chip = ScriptedChip::new(ChipKind::Mfrc522);
    chip.push_reply(Transceived::new(TransceiveStatus::Collision, vec![0x01], 0));

    assert!(matches!(type_a::select(&mut chip, true), Err(Error::Collision)));
    assert_eq!(chip.sent().len(), 1);
}
