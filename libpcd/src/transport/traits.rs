// libpcd/src/transport/traits.rs

use crate::Result;

/// Register-level access to a PCD chip, supplied by the host.
///
/// Implementations wrap whatever physical bus is wired up (SPI, I2C,
/// UART). Calls must be synchronous and must reach the chip in the order
/// they are made.
pub trait RegisterBus {
    /// Read one register.
    fn read_register(&mut self, address: u8) -> Result<u8>;

    /// Write one or more bytes to a register. Multi-byte writes are used
    /// to fill the FIFO data register.
    fn write_register(&mut self, address: u8, data: &[u8]) -> Result<()>;

    /// One-time power-up hook run before the first soft reset, e.g. to
    /// release a reset line. The default does nothing.
    fn startup(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for Box<B> {
    fn read_register(&mut self, address: u8) -> Result<u8> {
        (**self).read_register(address)
    }

    fn write_register(&mut self, address: u8, data: &[u8]) -> Result<()> {
        (**self).write_register(address, data)
    }

    fn startup(&mut self) -> Result<()> {
        (**self).startup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockBus;

    #[test]
    fn trait_object_read_write() {
        let mock = MockBus::new();
        let mut bus: Box<dyn RegisterBus> = Box::new(mock.clone());
        bus.write_register(0x14, &[0x83]).unwrap();
        assert_eq!(bus.read_register(0x14).unwrap(), 0x83);
        assert_eq!(mock.writes(), vec![(0x14, vec![0x83])]);
    }

    #[test]
    fn default_startup_is_noop() {
        struct Silent;
        impl RegisterBus for Silent {
            fn read_register(&mut self, _address: u8) -> Result<u8> {
                Ok(0)
            }
            fn write_register(&mut self, _address: u8, _data: &[u8]) -> Result<()> {
                Ok(())
            }
        }
        assert!(Silent.startup().is_ok());
    }
}
