//! MFRC522 register defaults

/// TModeReg: TAuto=1, TPrescaler_Hi=0x7
pub const T_MODE: u8 = 0x87;
/// TPrescalerReg: TPrescaler_Lo
pub const T_PRESCALER: u8 = 0xFF;
/// Full 12-bit prescaler, ~302 us per tick
pub const PRESCALER: u16 = 0x07FF;

/// TxASKReg: Force100ASK
pub const TX_ASK_FORCE_100: u8 = 0x40;

/// ModWidthReg value per speed index (106, 212, 424, 848 kBd)
pub const MOD_WIDTH: [u8; 4] = [0x26, 0x15, 0x0A, 0x05];

/// TxModeReg/RxModeReg: TxCRCEn/RxCRCEn
pub const CRC_EN: u8 = 0x80;
pub const SPEED_SHIFT: u8 = 4;
pub const SPEED_MASK: u8 = 0x07;
