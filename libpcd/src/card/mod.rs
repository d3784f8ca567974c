// libpcd/src/card/mod.rs

use crate::constants::{PICC_MF_AUTH_KEY_A, PICC_MF_AUTH_KEY_B};
use crate::device::ChipDriver;
use crate::protocol::exchange::{TransceiveOptions, Transceived};
use crate::types::{Atqa, CardProtocol, Sak, Uid};
use crate::{Error, Result};

mod raw;
pub mod type_a;

pub use raw::RawFraming;
pub use type_a::TypeA;

/// Operations a card protocol module provides on top of a chip driver.
pub trait CardProtocolOps {
    fn protocol(&self) -> CardProtocol;

    /// Invite idle (or, with `wakeup`, halted) cards. `None` means no
    /// card answered as expected.
    fn request(&self, chip: &mut dyn ChipDriver, wakeup: bool) -> Result<Option<Atqa>>;

    /// Resolve collisions and select one card.
    fn select(&self, chip: &mut dyn ChipDriver, disable_anti_collision: bool)
    -> Result<(Uid, Sak)>;

    /// Put the selected card to sleep. True when the card went quiet.
    fn halt(&self, chip: &mut dyn ChipDriver) -> Result<bool>;

    fn transceive(
        &self,
        chip: &mut dyn ChipDriver,
        frame: &[u8],
        opts: TransceiveOptions,
    ) -> Result<Transceived> {
        chip.transceive(frame, opts)
    }
}

static TYPE_A: TypeA = TypeA;
static TYPE_B: RawFraming = RawFraming::new(CardProtocol::B);
static FELICA: RawFraming = RawFraming::new(CardProtocol::Felica);

/// Protocol module for a framing protocol.
pub fn protocol_ops(protocol: CardProtocol) -> Result<&'static dyn CardProtocolOps> {
    match protocol {
        CardProtocol::A => Ok(&TYPE_A),
        CardProtocol::B => Ok(&TYPE_B),
        CardProtocol::Felica => Ok(&FELICA),
        CardProtocol::Mifare => Err(Error::UnsupportedProtocol(
            "MIFARE has no protocol module; select the card with Type A".into(),
        )),
    }
}

/// Which sector key a MIFARE Classic authentication uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MifareKey {
    A,
    B,
}

impl MifareKey {
    pub fn command(self) -> u8 {
        match self {
            MifareKey::A => PICC_MF_AUTH_KEY_A,
            MifareKey::B => PICC_MF_AUTH_KEY_B,
        }
    }
}

/// A selected card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    uid: Uid,
    sak: Sak,
    atqa: Option<Atqa>,
}

impl Card {
    pub fn new(uid: Uid, sak: Sak) -> Self {
        Self {
            uid,
            sak,
            atqa: None,
        }
    }

    pub fn with_atqa(mut self, atqa: Atqa) -> Self {
        self.atqa = Some(atqa);
        self
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }
    pub fn sak(&self) -> Sak {
        self.sak
    }
    pub fn atqa(&self) -> Option<Atqa> {
        self.atqa
    }
}
