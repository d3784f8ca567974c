// libpcd/src/device/models/mfrc522/mod.rs

//! NXP MFRC522 driver: linear register map, Type A only.
//!
//! The CRC coprocessor is used whenever the link runs above 106 kBd;
//! at 106 kBd the driver appends and checks CRC_A itself.

pub mod config;
pub mod registers;

use std::thread;
use std::time::Duration;

use crate::device::capability;
use crate::device::handshake::{self, FrameSettings, PcdCommand};
use crate::device::models::{ChipDriver, ChipState};
use crate::device::registers::{self as shared, FlatRegisters, RegisterAccess, VALUES_AFTER_COLL};
use crate::protocol::checksum::Crc16Variant;
use crate::protocol::exchange::{CollisionDetail, TransceiveOptions, Transceived};
use crate::transport::RegisterBus;
use crate::types::{BaudRate, CardProtocol, ChipKind, Direction};
use crate::utils::timeout::{DEFAULT_TRANSCEIVE_TIMEOUT, RESET_SETTLE_TIME, timeout_to_ticks};
use crate::{Error, Result};

use registers::CORE;

pub struct Mfrc522 {
    io: FlatRegisters,
    state: ChipState,
    timeout: Duration,
}

impl Mfrc522 {
    pub fn new(bus: Box<dyn RegisterBus>) -> Self {
        Self {
            io: FlatRegisters::new(bus),
            state: ChipState {
                protocol: Some(CardProtocol::A),
                built_in_crc: false,
            },
            timeout: DEFAULT_TRANSCEIVE_TIMEOUT,
        }
    }

    fn mode_register(direction: Direction) -> u8 {
        match direction {
            Direction::Tx => registers::TX_MODE_REG,
            Direction::Rx => registers::RX_MODE_REG,
        }
    }
}

impl ChipDriver for Mfrc522 {
    fn kind(&self) -> ChipKind {
        ChipKind::Mfrc522
    }

    fn state(&self) -> ChipState {
        self.state
    }

    fn startup(&mut self) -> Result<()> {
        self.io.startup()
    }

    fn soft_reset(&mut self) -> Result<()> {
        log::debug!("MFRC522 soft reset");
        self.io
            .write_byte(registers::COMMAND_REG, PcdCommand::SoftReset as u8)?;
        thread::sleep(RESET_SETTLE_TIME);

        self.io.write_byte(registers::T_MODE_REG, config::T_MODE)?;
        self.io
            .write_byte(registers::T_PRESCALER_REG, config::T_PRESCALER)?;
        self.io
            .write_byte(registers::TX_ASK_REG, config::TX_ASK_FORCE_100)?;

        // Mode registers come back at 106 kBd with CRC off
        self.state.built_in_crc = false;
        Ok(())
    }

    fn config_reset(&mut self) -> Result<()> {
        self.io
            .write_byte(registers::COMMAND_REG, PcdCommand::Idle as u8)?;
        self.mifare_deauthenticate()?;
        self.io.clear_bitmask(registers::COLL_REG, VALUES_AFTER_COLL)?;

        self.transceiver_baud_rate(Direction::Tx, Some(BaudRate::Kbd106))?;
        self.transceiver_baud_rate(Direction::Rx, Some(BaudRate::Kbd106))?;

        let ticks = timeout_to_ticks(self.timeout, config::PRESCALER);
        self.internal_timer(Some(ticks))?;
        Ok(())
    }

    fn apply_protocol(&mut self, protocol: CardProtocol) -> Result<()> {
        capability::ensure_protocol(self.kind(), protocol)?;
        match protocol {
            CardProtocol::A => Ok(()),
            other => Err(Error::UnsupportedProtocol(format!(
                "{} is not a framing protocol",
                other
            ))),
        }
    }

    fn transceiver_baud_rate(
        &mut self,
        direction: Direction,
        value: Option<BaudRate>,
    ) -> Result<BaudRate> {
        let reg = Self::mode_register(direction);
        if let Some(rate) = value {
            capability::ensure_baud_rate(self.kind(), rate)?;
            let index = rate.index();
            let built_in = index != 0;

            self.io
                .write_byte(registers::MOD_WIDTH_REG, config::MOD_WIDTH[index as usize])?;
            let mut mode = index << config::SPEED_SHIFT;
            if built_in {
                mode |= config::CRC_EN;
            }
            self.io.write_byte(reg, mode)?;
            self.state.built_in_crc = built_in;
        }

        let index = (self.io.read(reg)? >> config::SPEED_SHIFT) & config::SPEED_MASK;
        BaudRate::from_index(index).ok_or_else(|| {
            Error::UnexpectedData(format!("speed field {} in mode register", index))
        })
    }

    fn antenna_on(&mut self) -> Result<()> {
        log::debug!("MFRC522 antenna on");
        shared::antenna_on(&mut self.io, &CORE)
    }

    fn antenna_off(&mut self) -> Result<()> {
        log::debug!("MFRC522 antenna off");
        shared::antenna_off(&mut self.io, &CORE)
    }

    fn internal_timer(&mut self, ticks: Option<u16>) -> Result<u16> {
        shared::internal_timer(&mut self.io, &CORE, ticks)
    }

    fn set_transceive_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn transceive_timeout(&self) -> Duration {
        self.timeout
    }

    fn mifare_authenticate(
        &mut self,
        command: u8,
        block_addr: u8,
        sector_key: &[u8; 6],
        uid: &[u8],
    ) -> Result<bool> {
        capability::ensure_protocol(self.kind(), CardProtocol::Mifare)?;
        handshake::mifare_authenticate(&mut self.io, &CORE, command, block_addr, sector_key, uid)
    }

    fn mifare_deauthenticate(&mut self) -> Result<()> {
        shared::mifare_deauthenticate(&mut self.io, &CORE)
    }

    fn transceive(&mut self, frame: &[u8], opts: TransceiveOptions) -> Result<Transceived> {
        let settings = FrameSettings {
            built_in_crc: self.state.built_in_crc,
            crc_variant: Crc16Variant::A,
            buffer_size: self.capabilities().buffer_size,
        };
        handshake::transceive(&mut self.io, &CORE, settings, frame, opts)
    }

    fn collision_detail(&mut self) -> Result<CollisionDetail> {
        shared::collision_detail(&mut self.io, &CORE)
    }

    fn version(&mut self) -> Result<u8> {
        self.io.read(registers::VERSION_REG)
    }
}
