// libpcd/src/device/handshake.rs

//! FIFO/command handshake shared by every chip driver.

use crate::constants::IRQ_POLL_BUDGET;
use crate::device::registers::{CoreRegisters, RegisterAccess, crypto1_active};
use crate::protocol::checksum::{Crc16Variant, append_crc16, check_crc16};
use crate::protocol::exchange::{TransceiveOptions, TransceiveStatus, Transceived};
use crate::{Error, Result};

/// Commands understood by the CommandReg of both chip families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PcdCommand {
    Idle = 0x00,
    Transceive = 0x0C,
    MfAuthent = 0x0E,
    SoftReset = 0x0F,
}

// ComIrqReg
pub const TIMER_IRQ: u8 = 0x01;
pub const IDLE_IRQ: u8 = 0x10;
pub const RX_IRQ: u8 = 0x20;
pub const CLEAR_ALL_IRQS: u8 = 0x7F;

// ErrorReg
pub const PROTOCOL_ERR: u8 = 0x01;
pub const PARITY_ERR: u8 = 0x02;
pub const CRC_ERR: u8 = 0x04;
pub const COLL_ERR: u8 = 0x08;
pub const BUFFER_OVFL: u8 = 0x10;

/// FIFOLevelReg: FlushBuffer
pub const FLUSH_BUFFER: u8 = 0x80;
/// BitFramingReg: StartSend
pub const START_SEND: u8 = 0x80;

const FIFO_LEVEL_MASK: u8 = 0x7F;
const RX_LAST_BITS_MASK: u8 = 0x07;

impl PcdCommand {
    /// Interrupt flags that mark completion of this command.
    fn completion_irq(self) -> u8 {
        match self {
            PcdCommand::Transceive => RX_IRQ | IDLE_IRQ,
            _ => IDLE_IRQ,
        }
    }
}

/// Map ErrorReg to a status. Priority order is fixed.
pub fn status_from_error(error: u8) -> Option<TransceiveStatus> {
    if error & BUFFER_OVFL != 0 {
        Some(TransceiveStatus::BufferOverflow)
    } else if error & CRC_ERR != 0 {
        Some(TransceiveStatus::CrcError)
    } else if error & PARITY_ERR != 0 {
        Some(TransceiveStatus::ParityError)
    } else if error & PROTOCOL_ERR != 0 {
        Some(TransceiveStatus::ProtocolError)
    } else {
        None
    }
}

/// Run `command` with `data` in the FIFO and collect the outcome.
pub fn communicate<R: RegisterAccess + ?Sized>(
    io: &mut R,
    regs: &CoreRegisters,
    command: PcdCommand,
    data: &[u8],
    rx_align: u8,
    tx_lastbits: u8,
) -> Result<Transceived> {
    if rx_align > 7 || tx_lastbits > 7 {
        return Err(Error::Usage(format!(
            "bit framing out of range: rx_align={}, tx_lastbits={}",
            rx_align, tx_lastbits
        )));
    }
    let wait_irq = command.completion_irq();
    let framing = (rx_align << 4) | tx_lastbits;

    io.write_byte(regs.command, PcdCommand::Idle as u8)?;
    io.write_byte(regs.com_irq, CLEAR_ALL_IRQS)?;
    io.write_byte(regs.fifo_level, FLUSH_BUFFER)?;
    if !data.is_empty() {
        io.write(regs.fifo_data, data)?;
    }
    io.write_byte(regs.bit_framing, framing)?;
    io.write_byte(regs.command, command as u8)?;
    if command == PcdCommand::Transceive {
        io.write_byte(regs.bit_framing, framing | START_SEND)?;
    }

    let mut budget = IRQ_POLL_BUDGET;
    loop {
        let irq = io.read(regs.com_irq)?;
        if irq & wait_irq != 0 {
            break;
        }
        if irq & TIMER_IRQ != 0 {
            log::debug!("{:?}: no answer before the timer expired", command);
            return Ok(Transceived::status(TransceiveStatus::PiccTimeout));
        }
        if budget == 0 {
            log::debug!("{:?}: poll budget exhausted", command);
            return Ok(Transceived::status(TransceiveStatus::PcdTimeout));
        }
        budget -= 1;
    }

    let error = io.read(regs.error)?;
    if let Some(status) = status_from_error(error) {
        return Ok(Transceived::status(status));
    }

    let level = io.read(regs.fifo_level)? & FIFO_LEVEL_MASK;
    let mut received = Vec::with_capacity(level as usize);
    for _ in 0..level {
        received.push(io.read(regs.fifo_data)?);
    }
    let valid_bits = io.read(regs.control)? & RX_LAST_BITS_MASK;

    let status = if error & COLL_ERR != 0 {
        TransceiveStatus::Collision
    } else {
        TransceiveStatus::Ok
    };
    Ok(Transceived::new(status, received, valid_bits))
}

/// Run MFAuthent with `{command, block, key[6], uid[0..4]}` and report
/// whether the Crypto1 unit came up.
pub fn mifare_authenticate<R: RegisterAccess + ?Sized>(
    io: &mut R,
    regs: &CoreRegisters,
    command: u8,
    block_addr: u8,
    sector_key: &[u8; 6],
    uid: &[u8],
) -> Result<bool> {
    if uid.len() < 4 {
        return Err(Error::Usage(format!(
            "authentication needs at least 4 UID bytes, got {}",
            uid.len()
        )));
    }
    let mut buffer = Vec::with_capacity(12);
    buffer.push(command);
    buffer.push(block_addr);
    buffer.extend_from_slice(sector_key);
    buffer.extend_from_slice(&uid[..4]);

    let outcome = communicate(io, regs, PcdCommand::MfAuthent, &buffer, 0, 0)?;
    if !outcome.status.is_ok() {
        log::debug!("MFAuthent finished with {}", outcome.status);
    }
    crypto1_active(io, regs)
}

/// How a driver frames one transceive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSettings {
    /// The chip appends and checks CRC itself at the current baud rate.
    pub built_in_crc: bool,
    pub crc_variant: Crc16Variant,
    pub buffer_size: usize,
}

/// Transceive with software CRC handling on top of [`communicate`].
pub fn transceive<R: RegisterAccess + ?Sized>(
    io: &mut R,
    regs: &CoreRegisters,
    settings: FrameSettings,
    frame: &[u8],
    opts: TransceiveOptions,
) -> Result<Transceived> {
    if !opts.crc && settings.built_in_crc {
        return Err(Error::Usage(
            "built-in CRC is active at this baud rate; CRC cannot be disabled".into(),
        ));
    }
    let software_crc = opts.crc && !settings.built_in_crc;

    let mut outgoing = frame.to_vec();
    if software_crc {
        append_crc16(&mut outgoing, settings.crc_variant);
    }
    if outgoing.len() > settings.buffer_size {
        return Err(Error::FrameTooLong {
            len: outgoing.len(),
            max: settings.buffer_size,
        });
    }

    #[cfg(feature = "diagnostics")]
    log::debug!(
        "PCD > PICC: {}",
        crate::utils::hex::bytes_to_hex_spaced(&outgoing)
    );

    let mut reply = communicate(
        io,
        regs,
        PcdCommand::Transceive,
        &outgoing,
        opts.rx_align,
        opts.tx_lastbits,
    )?;

    #[cfg(feature = "diagnostics")]
    if reply.status.is_ok() {
        log::debug!(
            "PICC > PCD: {} (valid bits: {})",
            crate::utils::hex::bytes_to_hex_spaced(&reply.data),
            reply.valid_bits
        );
    }

    if reply.status.is_ok()
        && software_crc
        && reply.data.len() > 2
        && !check_crc16(&mut reply.data, settings.crc_variant, true)
    {
        return Err(Error::IncorrectCrc);
    }
    Ok(reply)
}
