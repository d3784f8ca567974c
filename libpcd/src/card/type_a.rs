// libpcd/src/card/type_a.rs

//! ISO/IEC 14443-3 Type A activation: REQA/WUPA, anticollision and
//! select over up to three cascade levels, HLTA.

use crate::card::CardProtocolOps;
use crate::constants::{
    CASCADE_LEVEL_BITS, CASCADE_LEVELS, MAX_ANTICOLLISION_ROUNDS, PICC_CT, PICC_HLTA, PICC_REQA,
    PICC_WUPA, SHORT_FRAME_BITS,
};
use crate::device::ChipDriver;
use crate::protocol::checksum::{Crc16Variant, check_crc16};
use crate::protocol::exchange::{TransceiveOptions, TransceiveStatus, Transceived};
use crate::protocol::frame::SelectFrame;
use crate::types::{Atqa, CardProtocol, Sak, Uid};
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct TypeA;

impl CardProtocolOps for TypeA {
    fn protocol(&self) -> CardProtocol {
        CardProtocol::A
    }

    fn request(&self, chip: &mut dyn ChipDriver, wakeup: bool) -> Result<Option<Atqa>> {
        request(chip, wakeup)
    }

    fn select(
        &self,
        chip: &mut dyn ChipDriver,
        disable_anti_collision: bool,
    ) -> Result<(Uid, Sak)> {
        select(chip, disable_anti_collision)
    }

    fn halt(&self, chip: &mut dyn ChipDriver) -> Result<bool> {
        halt(chip)
    }
}

/// Send REQA (or WUPA) as a 7-bit short frame. A card answers with a
/// 16-bit ATQA; anything else counts as no card.
pub fn request(chip: &mut dyn ChipDriver, wakeup: bool) -> Result<Option<Atqa>> {
    chip.config_reset()?;

    let command = if wakeup { PICC_WUPA } else { PICC_REQA };
    let reply = chip.transceive(
        &[command],
        TransceiveOptions::bit_oriented(0, SHORT_FRAME_BITS),
    )?;

    if reply.status.is_ok() && reply.valid_bits == 0 {
        if let Ok(atqa) = Atqa::try_from(reply.data.as_slice()) {
            return Ok(Some(atqa));
        }
    }
    log::debug!(
        "no ATQA: status {}, {} byte(s), {} valid bit(s)",
        reply.status,
        reply.data.len(),
        reply.valid_bits
    );
    Ok(None)
}

pub fn wakeup(chip: &mut dyn ChipDriver) -> Result<Option<Atqa>> {
    request(chip, true)
}

/// Send HLTA. A halted card stays silent, so only a timeout is success.
pub fn halt(chip: &mut dyn ChipDriver) -> Result<bool> {
    let reply = chip.transceive(&[PICC_HLTA, 0x00], TransceiveOptions::default())?;
    Ok(reply.status == TransceiveStatus::PiccTimeout)
}

/// Run anticollision and select until the card reports a complete UID.
///
/// The cascade tag is dropped from the returned UID. The SAK is the one
/// of the last cascade level.
pub fn select(chip: &mut dyn ChipDriver, disable_anti_collision: bool) -> Result<(Uid, Sak)> {
    let mut uid = Vec::with_capacity(10);
    let mut sak = Sak::new(0);

    for &cascade_level in CASCADE_LEVELS.iter() {
        let (level_uid, level_sak) = select_level(chip, cascade_level, disable_anti_collision)?;
        match level_uid.split_first() {
            Some((&PICC_CT, rest)) => uid.extend_from_slice(rest),
            _ => uid.extend_from_slice(&level_uid),
        }
        sak = level_sak;
        if !sak.has_more_levels() {
            break;
        }
    }

    log::debug!("selected card {} (SAK {:#04x})", crate::utils::bytes_to_hex(&uid), sak.value());
    Ok((Uid::try_from(uid)?, sak))
}

/// One cascade level. Returns the four UID bytes of the level (cascade
/// tag included) and the SAK.
fn select_level(
    chip: &mut dyn ChipDriver,
    cascade_level: u8,
    disable_anti_collision: bool,
) -> Result<(Vec<u8>, Sak)> {
    let mut frame = SelectFrame::new(cascade_level);
    let mut known_bits: u8 = 0;

    for _ in 0..MAX_ANTICOLLISION_ROUNDS {
        let full_select = known_bits >= CASCADE_LEVEL_BITS;
        let tx_lastbits = if full_select {
            if !frame.prepare_select() {
                // Start the level over; the round still counts
                log::debug!("malformed UID buffer at level {:#04x}", cascade_level);
                frame = SelectFrame::new(cascade_level);
                known_bits = 0;
                continue;
            }
            0
        } else {
            frame.prepare_anticollision(known_bits)
        };

        let reply = chip.transceive(
            frame.as_bytes(),
            TransceiveOptions::bit_oriented(tx_lastbits, tx_lastbits),
        )?;
        let collided = match reply.status {
            TransceiveStatus::Ok => false,
            TransceiveStatus::Collision => true,
            other => return Err(other.into()),
        };
        if collided && disable_anti_collision {
            return Err(Error::Collision);
        }
        if reply.data.is_empty() {
            return Err(Error::UnexpectedData("empty UID data".into()));
        }

        if !full_select {
            frame.merge_response(&reply.data, tx_lastbits);
        }

        if collided {
            let detail = chip.collision_detail()?;
            if !detail.valid || detail.position <= known_bits {
                log::debug!(
                    "unresolvable collision (valid: {}, position {}, known bits {})",
                    detail.valid,
                    detail.position,
                    known_bits
                );
                return Err(Error::Collision);
            }
            known_bits = detail.position;
            frame.mark_collision(known_bits);
        } else if full_select {
            let sak = check_sak(reply)?;
            return Ok((frame.uid_bytes().to_vec(), sak));
        } else {
            known_bits = CASCADE_LEVEL_BITS;
        }
    }

    Err(Error::IncompleteUid {
        rounds: MAX_ANTICOLLISION_ROUNDS,
    })
}

/// SAK reply is one byte plus CRC_A, whole bytes only.
fn check_sak(reply: Transceived) -> Result<Sak> {
    let mut data = reply.data;
    if data.len() != 3 || reply.valid_bits != 0 {
        return Err(Error::UnexpectedData(format!(
            "SAK reply of {} byte(s), {} valid bit(s)",
            data.len(),
            reply.valid_bits
        )));
    }
    if !check_crc16(&mut data, Crc16Variant::A, true) {
        return Err(Error::IncorrectCrc);
    }
    Ok(Sak::new(data[0]))
}
