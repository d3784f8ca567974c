// libpcd/src/device/handle.rs

use std::marker::PhantomData;
use std::time::Duration;

use crate::card::{Card, CardProtocolOps, MifareKey, protocol_ops};
use crate::device::capability;
use crate::device::config::ReaderConfig;
use crate::device::models::{ChipDriver, create_driver_for};
use crate::protocol::exchange::{TransceiveOptions, Transceived};
use crate::transport::RegisterBus;
use crate::types::{Atqa, CardProtocol, ChipKind, Sak, Uid};
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Reader handle that enforces initialization state at compile time.
///
/// Owns the chip driver and with it all chip register state, so every
/// operation needs `&mut self`. Share a reader across threads only
/// behind a lock.
pub struct Reader<State = Uninitialized> {
    driver: Box<dyn ChipDriver>,
    config: ReaderConfig,
    _state: PhantomData<State>,
}

impl<State> Reader<State> {
    pub fn chip_kind(&self) -> ChipKind {
        self.driver.kind()
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn driver(&self) -> &dyn ChipDriver {
        self.driver.as_ref()
    }
}

impl Reader<Uninitialized> {
    /// Create a reader for `config.chip` on top of a host register bus.
    pub fn new(bus: Box<dyn RegisterBus>, config: ReaderConfig) -> Self {
        let driver = create_driver_for(config.chip, bus);
        Self::with_driver(driver, config)
    }

    /// Use an already constructed driver. `config.chip` is ignored in
    /// favour of the driver's own kind.
    pub fn with_driver(driver: Box<dyn ChipDriver>, mut config: ReaderConfig) -> Self {
        config.chip = driver.kind();
        Self {
            driver,
            config,
            _state: PhantomData,
        }
    }

    /// Power up the chip: bus startup hook, soft reset, timeout and the
    /// configured protocol, then the antenna. Runs once per reader.
    pub fn initialize(mut self) -> Result<Reader<Initialized>> {
        log::debug!("initializing {} reader", self.driver.kind());

        self.driver.startup()?;
        self.driver.soft_reset()?;
        self.driver
            .set_transceive_timeout(self.config.transceive_timeout);
        if let Some(protocol) = self.config.protocol {
            capability::ensure_protocol(self.driver.kind(), protocol)?;
            self.driver.apply_protocol(protocol)?;
        }
        self.driver.antenna_on()?;

        Ok(Reader {
            driver: self.driver,
            config: self.config,
            _state: PhantomData,
        })
    }
}

impl Reader<Initialized> {
    pub fn driver_mut(&mut self) -> &mut dyn ChipDriver {
        self.driver.as_mut()
    }

    /// Active card protocol.
    pub fn protocol(&self) -> Result<CardProtocol> {
        self.driver.current_protocol().ok_or(Error::UndefinedProtocol)
    }

    /// Switch the card protocol. Unsupported protocols are rejected
    /// before any register access.
    pub fn set_protocol(&mut self, protocol: CardProtocol) -> Result<()> {
        capability::ensure_protocol(self.driver.kind(), protocol)?;
        self.driver.apply_protocol(protocol)?;
        self.config.protocol = Some(protocol);
        Ok(())
    }

    pub fn transceive_timeout(&self) -> Duration {
        self.driver.transceive_timeout()
    }

    /// Takes effect at the next config reset, i.e. the next request.
    pub fn set_transceive_timeout(&mut self, timeout: Duration) {
        self.config.transceive_timeout = timeout;
        self.driver.set_transceive_timeout(timeout);
    }

    fn ops(&self) -> Result<&'static dyn CardProtocolOps> {
        protocol_ops(self.protocol()?)
    }

    pub fn request(&mut self, wakeup: bool) -> Result<Option<Atqa>> {
        let ops = self.ops()?;
        ops.request(self.driver.as_mut(), wakeup)
    }

    pub fn wakeup(&mut self) -> Result<Option<Atqa>> {
        self.request(true)
    }

    pub fn select(&mut self, disable_anti_collision: bool) -> Result<(Uid, Sak)> {
        let ops = self.ops()?;
        ops.select(self.driver.as_mut(), disable_anti_collision)
    }

    pub fn halt(&mut self) -> Result<bool> {
        let ops = self.ops()?;
        ops.halt(self.driver.as_mut())
    }

    pub fn transceive(&mut self, frame: &[u8], opts: TransceiveOptions) -> Result<Transceived> {
        let ops = self.ops()?;
        ops.transceive(self.driver.as_mut(), frame, opts)
    }

    /// Request (or wake up) and select one card. `Ok(None)` when no card
    /// answered the request.
    pub fn activate(&mut self, wakeup: bool) -> Result<Option<Card>> {
        let atqa = match self.request(wakeup)? {
            Some(atqa) => atqa,
            None => return Ok(None),
        };
        let (uid, sak) = self.select(false)?;
        Ok(Some(Card::new(uid, sak).with_atqa(atqa)))
    }

    /// Start a MIFARE Classic Crypto1 session with the selected `card`.
    pub fn mifare_authenticate(
        &mut self,
        key: MifareKey,
        block_addr: u8,
        sector_key: &[u8; 6],
        card: &Card,
    ) -> Result<bool> {
        self.driver
            .mifare_authenticate(key.command(), block_addr, sector_key, card.uid().as_bytes())
    }

    pub fn mifare_deauthenticate(&mut self) -> Result<()> {
        self.driver.mifare_deauthenticate()
    }
}
