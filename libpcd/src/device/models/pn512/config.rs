//! PN512 register defaults and per-protocol analog settings

use crate::types::BaudRate;

/// TModeReg: TAuto=1, TPrescaler_Hi=0x7
pub const T_MODE: u8 = 0x87;
pub const T_PRESCALER: u8 = 0xFF;
pub const PRESCALER: u16 = 0x07FF;

/// RFCfgReg: RxGain 33 dB, RFLevel 0x9
pub const RF_CFG: u8 = 0x59;
/// TxControlReg: InvTx2RFOn | CheckRF
pub const TX_CONTROL_RESET_BITS: u8 = 0x84;
/// RxSelReg: UartSel = modulated signal from the analog part
pub const RX_SEL: u8 = 0x80;
pub const MODE: u8 = 0x00;
pub const GS_N_ON: u8 = 0xFF;
pub const CW_GS_P: u8 = 0x3F;
pub const GS_N_OFF: u8 = 0xF2;
pub const BIT_FRAMING: u8 = 0x00;
/// FIFO warning level is this many bytes below the buffer size
pub const WATER_LEVEL_MARGIN: usize = 9;

/// ControlReg: Initiator
pub const CONTROL_INITIATOR: u8 = 0x10;
/// ManualRCVReg: ParityDisable
pub const PARITY_DISABLE: u8 = 0x10;
/// RxSelReg: RxWait field
pub const RX_WAIT_MASK: u8 = 0x3F;

/// ModWidthReg value per speed index (106 to 848 kBd)
pub const MOD_WIDTH: [u8; 4] = [0x26, 0x15, 0x0A, 0x05];

/// TxModeReg/RxModeReg bits
pub const CRC_EN: u8 = 0x80;
pub const SPEED_SHIFT: u8 = 4;
pub const SPEED_MASK: u8 = 0x07;

/// Framing field of the mode registers
pub const FRAMING_ISO14443A: u8 = 0b00;
pub const FRAMING_FELICA: u8 = 0b10;
pub const FRAMING_ISO14443B: u8 = 0b11;

/// Analog front end settings for one card protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolSettings {
    pub rx_threshold: u8,
    /// Written to TypeBReg when present
    pub type_b: Option<u8>,
    pub parity_disabled: bool,
    pub tx_auto: u8,
    pub mod_gs_p: u8,
    pub rx_wait: u8,
    /// Baud rate programmed by config_reset
    pub base_rate: BaudRate,
}

pub const TYPE_A: ProtocolSettings = ProtocolSettings {
    rx_threshold: 0x55,
    type_b: None,
    parity_disabled: false,
    // Force100ASK
    tx_auto: 0x40,
    mod_gs_p: 0x3F,
    rx_wait: 0x08,
    base_rate: BaudRate::Kbd106,
};

pub const TYPE_B: ProtocolSettings = ProtocolSettings {
    rx_threshold: 0x50,
    type_b: Some(0x00),
    parity_disabled: false,
    tx_auto: 0x00,
    mod_gs_p: 0x11,
    rx_wait: 0x08,
    base_rate: BaudRate::Kbd106,
};

pub const FELICA: ProtocolSettings = ProtocolSettings {
    rx_threshold: 0x55,
    type_b: None,
    parity_disabled: true,
    tx_auto: 0x00,
    mod_gs_p: 0x12,
    rx_wait: 0x03,
    base_rate: BaudRate::Kbd212,
};
