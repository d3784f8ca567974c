//! Test support helpers intended for use by unit and integration tests.
//!
//! [`ScriptedChip`] stands in for a real chip driver when exercising the
//! card protocol engines; [`MockBus`] based helpers build readers on a
//! simulated register file.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::device::capability;
use crate::device::{ChipDriver, ChipState, Reader, ReaderConfig, Uninitialized};
use crate::protocol::checksum::{Crc16Variant, append_crc16};
use crate::protocol::exchange::{CollisionDetail, TransceiveOptions, TransceiveStatus, Transceived};
use crate::protocol::frame::bcc;
use crate::transport::MockBus;
use crate::types::{BaudRate, CardProtocol, ChipKind, Direction};
use crate::utils::timeout::DEFAULT_TRANSCEIVE_TIMEOUT;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Transceived>,
    collisions: VecDeque<CollisionDetail>,
    sent: Vec<(Vec<u8>, TransceiveOptions)>,
    config_resets: usize,
    soft_resets: usize,
    startups: usize,
    antenna: bool,
}

/// Chip driver that replays queued transceive outcomes and records
/// every frame it is asked to send. Clones share the script.
///
/// An exhausted reply queue answers with `PiccTimeout`, an exhausted
/// collision queue with an unlocalised collision.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct ScriptedChip {
    kind: ChipKind,
    state: ChipState,
    baud: [BaudRate; 2],
    timer: u16,
    timeout: Duration,
    script: Rc<RefCell<Script>>,
}

impl ScriptedChip {
    pub fn new(kind: ChipKind) -> Self {
        Self {
            kind,
            state: ChipState {
                protocol: Some(CardProtocol::A),
                built_in_crc: false,
            },
            baud: [BaudRate::Kbd106; 2],
            timer: 0,
            timeout: DEFAULT_TRANSCEIVE_TIMEOUT,
            script: Rc::new(RefCell::new(Script::default())),
        }
    }

    pub fn push_reply(&self, reply: Transceived) {
        self.script.borrow_mut().replies.push_back(reply);
    }

    pub fn push_collision(&self, detail: CollisionDetail) {
        self.script.borrow_mut().collisions.push_back(detail);
    }

    /// Frames sent so far with their options.
    pub fn sent(&self) -> Vec<(Vec<u8>, TransceiveOptions)> {
        self.script.borrow().sent.clone()
    }

    pub fn config_resets(&self) -> usize {
        self.script.borrow().config_resets
    }

    pub fn soft_resets(&self) -> usize {
        self.script.borrow().soft_resets
    }

    pub fn startups(&self) -> usize {
        self.script.borrow().startups
    }

    pub fn antenna(&self) -> bool {
        self.script.borrow().antenna
    }

    pub fn replies_left(&self) -> usize {
        self.script.borrow().replies.len()
    }

    pub fn collisions_left(&self) -> usize {
        self.script.borrow().collisions.len()
    }
}

impl ChipDriver for ScriptedChip {
    fn kind(&self) -> ChipKind {
        self.kind
    }

    fn state(&self) -> ChipState {
        self.state
    }

    fn startup(&mut self) -> Result<()> {
        self.script.borrow_mut().startups += 1;
        Ok(())
    }

    fn soft_reset(&mut self) -> Result<()> {
        self.script.borrow_mut().soft_resets += 1;
        self.state.built_in_crc = false;
        Ok(())
    }

    fn config_reset(&mut self) -> Result<()> {
        self.script.borrow_mut().config_resets += 1;
        Ok(())
    }

    fn apply_protocol(&mut self, protocol: CardProtocol) -> Result<()> {
        capability::ensure_protocol(self.kind, protocol)?;
        if protocol == CardProtocol::Mifare {
            return Err(Error::UnsupportedProtocol("MIFARE Crypto1".into()));
        }
        self.state.protocol = Some(protocol);
        Ok(())
    }

    fn transceiver_baud_rate(
        &mut self,
        direction: Direction,
        value: Option<BaudRate>,
    ) -> Result<BaudRate> {
        let slot = match direction {
            Direction::Tx => 0,
            Direction::Rx => 1,
        };
        if let Some(rate) = value {
            capability::ensure_baud_rate(self.kind, rate)?;
            self.baud[slot] = rate;
            self.state.built_in_crc = rate != BaudRate::Kbd106;
        }
        Ok(self.baud[slot])
    }

    fn antenna_on(&mut self) -> Result<()> {
        self.script.borrow_mut().antenna = true;
        Ok(())
    }

    fn antenna_off(&mut self) -> Result<()> {
        self.script.borrow_mut().antenna = false;
        Ok(())
    }

    fn internal_timer(&mut self, ticks: Option<u16>) -> Result<u16> {
        if let Some(ticks) = ticks {
            self.timer = ticks;
        }
        Ok(self.timer)
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
        let mut frame = vec![command, block_addr];
        frame.extend_from_slice(sector_key);
        frame.extend_from_slice(uid.get(..4).unwrap_or(uid));
        let reply = self.transceive(&frame, TransceiveOptions::raw())?;
        Ok(reply.status.is_ok())
    }

    fn mifare_deauthenticate(&mut self) -> Result<()> {
        Ok(())
    }

    fn transceive(&mut self, frame: &[u8], opts: TransceiveOptions) -> Result<Transceived> {
        let mut script = self.script.borrow_mut();
        script.sent.push((frame.to_vec(), opts));
        Ok(script
            .replies
            .pop_front()
            .unwrap_or_else(|| Transceived::status(TransceiveStatus::PiccTimeout)))
    }

    fn collision_detail(&mut self) -> Result<CollisionDetail> {
        Ok(self
            .script
            .borrow_mut()
            .collisions
            .pop_front()
            .unwrap_or_else(CollisionDetail::unknown))
    }

    fn version(&mut self) -> Result<u8> {
        Ok(match self.kind {
            ChipKind::Mfrc522 => 0x92,
            ChipKind::Pn512 => 0x82,
        })
    }
}

/// Anticollision answer of one cascade level: four UID bytes and BCC.
#[doc(hidden)]
pub fn anticollision_reply(uid: [u8; 4]) -> Transceived {
    let mut data = uid.to_vec();
    data.push(bcc(&uid));
    Transceived::ok(data, 0)
}

/// SELECT answer: SAK followed by its CRC_A.
#[doc(hidden)]
pub fn sak_reply(sak: u8) -> Transceived {
    let mut data = vec![sak];
    append_crc16(&mut data, Crc16Variant::A);
    Transceived::ok(data, 0)
}

/// Uninitialized reader on a fresh MockBus. The returned bus handle
/// shares state with the one the reader owns.
#[doc(hidden)]
pub fn mock_reader(config: ReaderConfig) -> (MockBus, Reader<Uninitialized>) {
    let bus = MockBus::new();
    let reader = Reader::new(Box::new(bus.clone()), config);
    (bus, reader)
}

/// Uninitialized reader driving a ScriptedChip.
#[doc(hidden)]
pub fn scripted_reader(kind: ChipKind) -> (ScriptedChip, Reader<Uninitialized>) {
    let chip = ScriptedChip::new(kind);
    let reader = Reader::with_driver(Box::new(chip.clone()), ReaderConfig::for_chip(kind));
    (chip, reader)
}
