// libpcd/src/constants.rs
//! ISO/IEC 14443-3 Type A command codes and protocol limits

/// REQuest command, Type A. 7-bit frame.
pub const PICC_REQA: u8 = 0x26;

/// Wake-UP command, Type A. Also wakes PICCs in HALT. 7-bit frame.
pub const PICC_WUPA: u8 = 0x52;

/// HaLT command, Type A, followed by 0x00 and CRC_A.
pub const PICC_HLTA: u8 = 0x50;

/// Cascade Tag, marks a UID continued at the next cascade level.
pub const PICC_CT: u8 = 0x88;

/// Anticollision/Select, cascade levels 1 to 3
pub const PICC_SEL_CL1: u8 = 0x93;
pub const PICC_SEL_CL2: u8 = 0x95;
pub const PICC_SEL_CL3: u8 = 0x97;

pub const CASCADE_LEVELS: [u8; 3] = [PICC_SEL_CL1, PICC_SEL_CL2, PICC_SEL_CL3];

/// MIFARE Classic authentication with key A / key B
pub const PICC_MF_AUTH_KEY_A: u8 = 0x60;
pub const PICC_MF_AUTH_KEY_B: u8 = 0x61;

/// NVB for a complete SELECT: 7 whole bytes, no extra bits.
pub const NVB_FULL_SELECT: u8 = 0x70;

/// REQA/WUPA are short frames of 7 bits.
pub const SHORT_FRAME_BITS: u8 = 7;

/// UID+BCC bits resolved per cascade level.
pub const CASCADE_LEVEL_BITS: u8 = 32;

/// Worst-case anticollision rounds per cascade level: one bit per round.
pub const MAX_ANTICOLLISION_ROUNDS: usize = 32;

/// Register polls before a command is declared hung, independent of the
/// chip timer.
pub const IRQ_POLL_BUDGET: usize = 2000;
