//! MFRC522 register address table (datasheet section 9).

use crate::device::registers::CoreRegisters;

// Page 0: command and status
pub const COMMAND_REG: u8 = 0x01;
pub const COM_I_EN_REG: u8 = 0x02;
pub const DIV_I_EN_REG: u8 = 0x03;
pub const COM_IRQ_REG: u8 = 0x04;
pub const DIV_IRQ_REG: u8 = 0x05;
pub const ERROR_REG: u8 = 0x06;
pub const STATUS1_REG: u8 = 0x07;
pub const STATUS2_REG: u8 = 0x08;
pub const FIFO_DATA_REG: u8 = 0x09;
pub const FIFO_LEVEL_REG: u8 = 0x0A;
pub const WATER_LEVEL_REG: u8 = 0x0B;
pub const CONTROL_REG: u8 = 0x0C;
pub const BIT_FRAMING_REG: u8 = 0x0D;
pub const COLL_REG: u8 = 0x0E;

// Page 1: command
pub const MODE_REG: u8 = 0x11;
pub const TX_MODE_REG: u8 = 0x12;
pub const RX_MODE_REG: u8 = 0x13;
pub const TX_CONTROL_REG: u8 = 0x14;
pub const TX_ASK_REG: u8 = 0x15;
pub const TX_SEL_REG: u8 = 0x16;
pub const RX_SEL_REG: u8 = 0x17;
pub const RX_THRESHOLD_REG: u8 = 0x18;
pub const DEMOD_REG: u8 = 0x19;
pub const MF_TX_REG: u8 = 0x1C;
pub const MF_RX_REG: u8 = 0x1D;
pub const SERIAL_SPEED_REG: u8 = 0x1F;

// Page 2: configuration
pub const CRC_RESULT_REG_H: u8 = 0x21;
pub const CRC_RESULT_REG_L: u8 = 0x22;
pub const MOD_WIDTH_REG: u8 = 0x24;
pub const RF_CFG_REG: u8 = 0x26;
pub const GS_N_REG: u8 = 0x27;
pub const CW_GS_P_REG: u8 = 0x28;
pub const MOD_GS_P_REG: u8 = 0x29;
pub const T_MODE_REG: u8 = 0x2A;
pub const T_PRESCALER_REG: u8 = 0x2B;
pub const T_RELOAD_REG_H: u8 = 0x2C;
pub const T_RELOAD_REG_L: u8 = 0x2D;
pub const T_COUNTER_VALUE_REG_H: u8 = 0x2E;
pub const T_COUNTER_VALUE_REG_L: u8 = 0x2F;

// Page 3: test
pub const TEST_SEL1_REG: u8 = 0x31;
pub const TEST_SEL2_REG: u8 = 0x32;
pub const TEST_PIN_EN_REG: u8 = 0x33;
pub const TEST_PIN_VALUE_REG: u8 = 0x34;
pub const TEST_BUS_REG: u8 = 0x35;
pub const AUTO_TEST_REG: u8 = 0x36;
pub const VERSION_REG: u8 = 0x37;
pub const ANALOG_TEST_REG: u8 = 0x38;
pub const TEST_DAC1_REG: u8 = 0x39;
pub const TEST_DAC2_REG: u8 = 0x3A;
pub const TEST_ADC_REG: u8 = 0x3B;

pub const CORE: CoreRegisters = CoreRegisters {
    command: COMMAND_REG,
    com_irq: COM_IRQ_REG,
    error: ERROR_REG,
    status2: STATUS2_REG,
    fifo_data: FIFO_DATA_REG,
    fifo_level: FIFO_LEVEL_REG,
    control: CONTROL_REG,
    bit_framing: BIT_FRAMING_REG,
    coll: COLL_REG,
    tx_control: TX_CONTROL_REG,
    t_reload_h: T_RELOAD_REG_H,
    t_reload_l: T_RELOAD_REG_L,
};
