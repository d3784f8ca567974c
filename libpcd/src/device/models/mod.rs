// libpcd/src/device/models/mod.rs

use std::time::Duration;

use crate::Result;
use crate::device::capability::Capabilities;
use crate::protocol::exchange::{CollisionDetail, TransceiveOptions, Transceived};
use crate::transport::RegisterBus;
use crate::types::{BaudRate, CardProtocol, ChipKind, Direction};

pub mod mfrc522;
pub mod pn512;

pub use mfrc522::Mfrc522;
pub use pn512::Pn512;

/// Mutable register-derived state owned by one driver instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChipState {
    /// Framing protocol currently programmed into the chip.
    pub protocol: Option<CardProtocol>,
    /// The chip's CRC coprocessor handles CRC at the current baud rate.
    pub built_in_crc: bool,
}

/// Register-level transceiver contract shared by every chip family.
///
/// Card protocol engines only talk to this trait, so they work with any
/// chip. All methods block until the chip answers or times out.
pub trait ChipDriver {
    fn kind(&self) -> ChipKind;

    fn capabilities(&self) -> &'static Capabilities {
        self.kind().capabilities()
    }

    fn state(&self) -> ChipState;

    /// Run the bus power-up hook. Called once before the first reset.
    fn startup(&mut self) -> Result<()>;

    /// Reset the chip, wait for it to settle and program timer and
    /// modulation defaults.
    fn soft_reset(&mut self) -> Result<()>;

    /// Return to a known idle state for the current protocol. Safe to call
    /// before every request/select/halt.
    fn config_reset(&mut self) -> Result<()>;

    /// Program the analog and framing registers for `protocol`.
    fn apply_protocol(&mut self, protocol: CardProtocol) -> Result<()>;

    fn current_protocol(&self) -> Option<CardProtocol> {
        self.state().protocol
    }

    /// Read, or set then read back, the baud rate of one direction.
    fn transceiver_baud_rate(
        &mut self,
        direction: Direction,
        value: Option<BaudRate>,
    ) -> Result<BaudRate>;

    fn antenna_on(&mut self) -> Result<()>;

    fn antenna_off(&mut self) -> Result<()>;

    /// Read, or program then read back, the timer reload value in ticks.
    /// `None` reads the current value.
    fn internal_timer(&mut self, ticks: Option<u16>) -> Result<u16>;

    /// Timeout programmed into the timer by every `config_reset`.
    fn set_transceive_timeout(&mut self, timeout: Duration);

    fn transceive_timeout(&self) -> Duration;

    /// Start a MIFARE Crypto1 session. Returns whether the chip reports
    /// the session as active afterwards.
    fn mifare_authenticate(
        &mut self,
        command: u8,
        block_addr: u8,
        sector_key: &[u8; 6],
        uid: &[u8],
    ) -> Result<bool>;

    fn mifare_deauthenticate(&mut self) -> Result<()>;

    fn transceive(&mut self, frame: &[u8], opts: TransceiveOptions) -> Result<Transceived>;

    /// Position of the first collision of the last transceive.
    fn collision_detail(&mut self) -> Result<CollisionDetail>;

    /// Contents of the chip version register.
    fn version(&mut self) -> Result<u8>;
}

/// Factory to create the driver for a chip family on top of `bus`.
pub fn create_driver_for(kind: ChipKind, bus: Box<dyn RegisterBus>) -> Box<dyn ChipDriver> {
    match kind {
        ChipKind::Mfrc522 => Box::new(Mfrc522::new(bus)),
        ChipKind::Pn512 => Box::new(Pn512::new(bus)),
    }
}
