// libpcd/src/protocol/mod.rs

pub mod checksum;
pub mod codec;
pub mod exchange;
pub mod frame;

pub use checksum::{Crc16Variant, append_crc16, append_crc32, check_crc16, check_crc32, crc16, crc32};
pub use codec::{append_sint, append_uint, to_sint, to_uint, xor};
pub use exchange::{CollisionDetail, TransceiveOptions, TransceiveStatus, Transceived};
pub use frame::SelectFrame;
