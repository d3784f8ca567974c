// libpcd/src/device/registers.rs

//! Register access shared by the chip drivers.
//!
//! [`RegisterAccess`] adds read-modify-write helpers on top of a
//! [`RegisterBus`]. [`FlatRegisters`] forwards addresses unchanged;
//! [`PagedRegisters`] splits each address into page and offset and
//! inserts a page-select write whenever the page changes.

use crate::protocol::exchange::CollisionDetail;
use crate::transport::RegisterBus;
use crate::{Error, Result};

/// Addresses of the registers every supported chip family shares in
/// function. Each driver supplies its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreRegisters {
    pub command: u8,
    pub com_irq: u8,
    pub error: u8,
    pub status2: u8,
    pub fifo_data: u8,
    pub fifo_level: u8,
    pub control: u8,
    pub bit_framing: u8,
    pub coll: u8,
    pub tx_control: u8,
    pub t_reload_h: u8,
    pub t_reload_l: u8,
}

/// Status2Reg: MIFARE Crypto1 unit active
pub const MF_CRYPTO1_ON: u8 = 0x08;
/// CollReg: bits received after a collision are cleared
pub const VALUES_AFTER_COLL: u8 = 0x80;
/// CollReg: no collision detected or position out of range
pub const COLL_POS_NOT_VALID: u8 = 0x20;
pub const COLL_POS_MASK: u8 = 0x1F;
/// TxControlReg: Tx1RFEn | Tx2RFEn
pub const ANTENNA_DRIVERS: u8 = 0x03;

pub trait RegisterAccess {
    fn read(&mut self, reg: u8) -> Result<u8>;

    fn write(&mut self, reg: u8, data: &[u8]) -> Result<()>;

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<()> {
        self.write(reg, &[value])
    }

    /// Set `mask` bits, skipping the write when nothing changes.
    fn set_bitmask(&mut self, reg: u8, mask: u8) -> Result<()> {
        let value = self.read(reg)?;
        let updated = value | mask;
        if updated != value {
            self.write_byte(reg, updated)?;
        }
        Ok(())
    }

    /// Clear `mask` bits, skipping the write when nothing changes.
    fn clear_bitmask(&mut self, reg: u8, mask: u8) -> Result<()> {
        let value = self.read(reg)?;
        let updated = value & !mask;
        if updated != value {
            self.write_byte(reg, updated)?;
        }
        Ok(())
    }

    /// Replace the `mask` field of `reg` with `set_bits`.
    fn clear_and_set_bitmask(&mut self, reg: u8, mask: u8, set_bits: u8) -> Result<()> {
        if set_bits & mask != set_bits {
            return Err(Error::Usage(format!(
                "set bits {:#04x} outside mask {:#04x}",
                set_bits, mask
            )));
        }
        let value = self.read(reg)?;
        let updated = (value & !mask) | set_bits;
        if updated != value {
            self.write_byte(reg, updated)?;
        }
        Ok(())
    }
}

/// Linear register map: addresses go to the bus unchanged.
pub struct FlatRegisters {
    bus: Box<dyn RegisterBus>,
}

impl FlatRegisters {
    pub fn new(bus: Box<dyn RegisterBus>) -> Self {
        Self { bus }
    }

    pub fn startup(&mut self) -> Result<()> {
        self.bus.startup()
    }
}

impl RegisterAccess for FlatRegisters {
    fn read(&mut self, reg: u8) -> Result<u8> {
        self.bus.read_register(reg)
    }

    fn write(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        self.bus.write_register(reg, data)
    }
}

/// Register map split into 16-register pages selected through a page
/// register. The last selected page is cached.
pub struct PagedRegisters {
    bus: Box<dyn RegisterBus>,
    page_reg: u8,
    current_page: Option<u8>,
}

/// PageReg: UsePageSelect
const USE_PAGE_SELECT: u8 = 0x80;

impl PagedRegisters {
    pub fn new(bus: Box<dyn RegisterBus>, page_reg: u8) -> Self {
        Self {
            bus,
            page_reg,
            current_page: None,
        }
    }

    pub fn startup(&mut self) -> Result<()> {
        self.bus.startup()
    }

    pub fn current_page(&self) -> Option<u8> {
        self.current_page
    }

    /// Forget the cached page, e.g. after the chip was reset.
    pub fn invalidate_page(&mut self) {
        self.current_page = None;
    }

    fn select_page_for(&mut self, reg: u8) -> Result<u8> {
        let page = (reg >> 4) & 0x0F;
        let offset = reg & 0x0F;
        if offset != self.page_reg && self.current_page != Some(page) {
            log::trace!("selecting register page {}", page);
            self.bus
                .write_register(self.page_reg, &[USE_PAGE_SELECT | (page & 0x03)])?;
            self.current_page = Some(page);
        }
        Ok(offset)
    }
}

impl RegisterAccess for PagedRegisters {
    fn read(&mut self, reg: u8) -> Result<u8> {
        let offset = self.select_page_for(reg)?;
        self.bus.read_register(offset)
    }

    fn write(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        let offset = self.select_page_for(reg)?;
        self.bus.write_register(offset, data)
    }
}

pub fn antenna_on<R: RegisterAccess + ?Sized>(io: &mut R, regs: &CoreRegisters) -> Result<()> {
    io.set_bitmask(regs.tx_control, ANTENNA_DRIVERS)
}

pub fn antenna_off<R: RegisterAccess + ?Sized>(io: &mut R, regs: &CoreRegisters) -> Result<()> {
    io.clear_bitmask(regs.tx_control, ANTENNA_DRIVERS)
}

/// Program (when `ticks` is given) and read back the timer reload value.
pub fn internal_timer<R: RegisterAccess + ?Sized>(
    io: &mut R,
    regs: &CoreRegisters,
    ticks: Option<u16>,
) -> Result<u16> {
    if let Some(ticks) = ticks {
        let [high, low] = ticks.to_be_bytes();
        io.write_byte(regs.t_reload_h, high)?;
        io.write_byte(regs.t_reload_l, low)?;
    }
    let high = io.read(regs.t_reload_h)?;
    let low = io.read(regs.t_reload_l)?;
    Ok(u16::from_be_bytes([high, low]))
}

pub fn collision_detail<R: RegisterAccess + ?Sized>(
    io: &mut R,
    regs: &CoreRegisters,
) -> Result<CollisionDetail> {
    let coll = io.read(regs.coll)?;
    if coll & COLL_POS_NOT_VALID != 0 {
        return Ok(CollisionDetail::unknown());
    }
    // CollPos 0 means bit 32
    let position = match coll & COLL_POS_MASK {
        0 => 32,
        p => p,
    };
    Ok(CollisionDetail::at(position))
}

pub fn mifare_deauthenticate<R: RegisterAccess + ?Sized>(
    io: &mut R,
    regs: &CoreRegisters,
) -> Result<()> {
    io.clear_bitmask(regs.status2, MF_CRYPTO1_ON)
}

pub fn crypto1_active<R: RegisterAccess + ?Sized>(io: &mut R, regs: &CoreRegisters) -> Result<bool> {
    Ok(io.read(regs.status2)? & MF_CRYPTO1_ON != 0)
}
