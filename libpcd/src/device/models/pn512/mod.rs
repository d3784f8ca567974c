// libpcd/src/device/models/pn512/mod.rs

//! NXP PN512 driver: paged register map, Type A, Type B and FeliCa.
//!
//! No framing protocol is active after construction or a soft reset;
//! `apply_protocol` must run before `config_reset` or `transceive`.
//!
//! Type B and FeliCa always use the CRC coprocessor. Type A uses it only
//! above 106 kBd; at 106 kBd the driver appends and checks CRC_A itself.

pub mod config;
pub mod registers;

use std::thread;
use std::time::Duration;

use crate::device::capability;
use crate::device::handshake::{self, FrameSettings, PcdCommand};
use crate::device::models::{ChipDriver, ChipState};
use crate::device::registers::{
    self as shared, PagedRegisters, RegisterAccess, VALUES_AFTER_COLL,
};
use crate::protocol::checksum::Crc16Variant;
use crate::protocol::exchange::{CollisionDetail, TransceiveOptions, Transceived};
use crate::transport::RegisterBus;
use crate::types::{BaudRate, CardProtocol, ChipKind, Direction};
use crate::utils::timeout::{DEFAULT_TRANSCEIVE_TIMEOUT, RESET_SETTLE_TIME, timeout_to_ticks};
use crate::{Error, Result};

use config::ProtocolSettings;
use registers::CORE;

pub struct Pn512 {
    io: PagedRegisters,
    state: ChipState,
    timeout: Duration,
}

impl Pn512 {
    pub fn new(bus: Box<dyn RegisterBus>) -> Self {
        Self {
            io: PagedRegisters::new(bus, registers::PAGE_REG),
            state: ChipState::default(),
            timeout: DEFAULT_TRANSCEIVE_TIMEOUT,
        }
    }

    /// Register page last selected on the bus, if known.
    pub fn current_page(&self) -> Option<u8> {
        self.io.current_page()
    }

    fn active_protocol(&self) -> Result<CardProtocol> {
        self.state.protocol.ok_or(Error::UndefinedProtocol)
    }

    fn settings_for(protocol: CardProtocol) -> Result<&'static ProtocolSettings> {
        match protocol {
            CardProtocol::A => Ok(&config::TYPE_A),
            CardProtocol::B => Ok(&config::TYPE_B),
            CardProtocol::Felica => Ok(&config::FELICA),
            other => Err(Error::UnsupportedProtocol(format!(
                "{} is not a framing protocol",
                other
            ))),
        }
    }

    fn mode_register(direction: Direction) -> u8 {
        match direction {
            Direction::Tx => registers::TX_MODE_REG,
            Direction::Rx => registers::RX_MODE_REG,
        }
    }

    /// Mode register framing bits and whether the CRC coprocessor is used.
    fn framing(protocol: CardProtocol, rate: BaudRate) -> (u8, bool) {
        match protocol {
            CardProtocol::B => (config::FRAMING_ISO14443B, true),
            CardProtocol::Felica => (config::FRAMING_FELICA, true),
            _ => (config::FRAMING_ISO14443A, rate != BaudRate::Kbd106),
        }
    }
}

impl ChipDriver for Pn512 {
    fn kind(&self) -> ChipKind {
        ChipKind::Pn512
    }

    fn state(&self) -> ChipState {
        self.state
    }

    fn startup(&mut self) -> Result<()> {
        self.io.startup()
    }

    fn soft_reset(&mut self) -> Result<()> {
        log::debug!("PN512 soft reset");
        self.io
            .write_byte(registers::COMMAND_REG, PcdCommand::SoftReset as u8)?;
        self.io.invalidate_page();
        thread::sleep(RESET_SETTLE_TIME);

        self.io.write_byte(registers::T_MODE_REG, config::T_MODE)?;
        self.io
            .write_byte(registers::T_PRESCALER_REG, config::T_PRESCALER)?;
        self.io.write_byte(registers::RF_CFG_REG, config::RF_CFG)?;
        self.io
            .set_bitmask(registers::TX_CONTROL_REG, config::TX_CONTROL_RESET_BITS)?;
        self.io.write_byte(registers::RX_SEL_REG, config::RX_SEL)?;
        self.io.write_byte(registers::MODE_REG, config::MODE)?;
        self.io.write_byte(registers::GS_N_ON_REG, config::GS_N_ON)?;
        self.io.write_byte(registers::CW_GS_P_REG, config::CW_GS_P)?;
        self.io.write_byte(registers::GS_N_OFF_REG, config::GS_N_OFF)?;
        self.io
            .write_byte(registers::BIT_FRAMING_REG, config::BIT_FRAMING)?;
        let water_level = self.capabilities().buffer_size - config::WATER_LEVEL_MARGIN;
        self.io
            .write_byte(registers::WATER_LEVEL_REG, water_level as u8)?;

        // Analog protocol settings are gone after a reset
        self.state = ChipState::default();
        Ok(())
    }

    fn config_reset(&mut self) -> Result<()> {
        let protocol = self.active_protocol()?;
        let settings = Self::settings_for(protocol)?;

        self.antenna_off()?;
        self.io
            .write_byte(registers::COMMAND_REG, PcdCommand::Idle as u8)?;
        self.mifare_deauthenticate()?;
        self.io.clear_bitmask(registers::COLL_REG, VALUES_AFTER_COLL)?;

        self.transceiver_baud_rate(Direction::Tx, Some(settings.base_rate))?;
        self.transceiver_baud_rate(Direction::Rx, Some(settings.base_rate))?;

        let ticks = timeout_to_ticks(self.timeout, config::PRESCALER);
        self.internal_timer(Some(ticks))?;

        self.antenna_on()
    }

    fn apply_protocol(&mut self, protocol: CardProtocol) -> Result<()> {
        capability::ensure_protocol(self.kind(), protocol)?;
        if self.state.protocol == Some(protocol) {
            return Ok(());
        }
        let settings = Self::settings_for(protocol)?;
        log::debug!("PN512 switching to {}", protocol);

        self.io
            .write_byte(registers::RX_THRESHOLD_REG, settings.rx_threshold)?;
        if let Some(type_b) = settings.type_b {
            self.io.write_byte(registers::TYPE_B_REG, type_b)?;
        }
        self.io
            .write_byte(registers::CONTROL_REG, config::CONTROL_INITIATOR)?;
        if settings.parity_disabled {
            self.io
                .set_bitmask(registers::MANUAL_RCV_REG, config::PARITY_DISABLE)?;
        } else {
            self.io
                .clear_bitmask(registers::MANUAL_RCV_REG, config::PARITY_DISABLE)?;
        }
        self.io.write_byte(registers::TX_AUTO_REG, settings.tx_auto)?;
        self.io
            .write_byte(registers::MOD_GS_P_REG, settings.mod_gs_p)?;
        self.io.clear_and_set_bitmask(
            registers::RX_SEL_REG,
            config::RX_WAIT_MASK,
            settings.rx_wait,
        )?;

        // Recorded before config_reset reads it, dropped again on failure
        self.state.protocol = Some(protocol);
        if let Err(err) = self.config_reset() {
            self.state = ChipState::default();
            return Err(err);
        }
        Ok(())
    }

    fn transceiver_baud_rate(
        &mut self,
        direction: Direction,
        value: Option<BaudRate>,
    ) -> Result<BaudRate> {
        let reg = Self::mode_register(direction);
        if let Some(rate) = value {
            let protocol = self.active_protocol()?;
            capability::ensure_baud_rate(self.kind(), rate)?;
            let (framing, built_in) = Self::framing(protocol, rate);
            let index = rate.index();

            if direction == Direction::Tx {
                if let Some(&width) = config::MOD_WIDTH.get(index as usize) {
                    self.io.write_byte(registers::MOD_WIDTH_REG, width)?;
                }
            }
            let mut mode = (index << config::SPEED_SHIFT) | framing;
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
        log::debug!("PN512 antenna on");
        shared::antenna_on(&mut self.io, &CORE)
    }

    fn antenna_off(&mut self) -> Result<()> {
        log::debug!("PN512 antenna off");
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
        let protocol = self.active_protocol()?;
        let settings = FrameSettings {
            built_in_crc: self.state.built_in_crc,
            crc_variant: Crc16Variant::try_from(protocol)?,
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
