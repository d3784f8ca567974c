// libpcd/src/card/raw.rs

use crate::card::CardProtocolOps;
use crate::device::ChipDriver;
use crate::types::{Atqa, CardProtocol, Sak, Uid};
use crate::{Error, Result};

/// Protocols the reader can frame but has no activation sequence for.
/// Only raw `transceive` is available.
#[derive(Debug)]
pub struct RawFraming {
    protocol: CardProtocol,
}

impl RawFraming {
    pub const fn new(protocol: CardProtocol) -> Self {
        Self { protocol }
    }

    fn unsupported(&self, operation: &str) -> Error {
        Error::UnsupportedProtocol(format!("{} has no {} operation", self.protocol, operation))
    }
}

impl CardProtocolOps for RawFraming {
    fn protocol(&self) -> CardProtocol {
        self.protocol
    }

    fn request(&self, _chip: &mut dyn ChipDriver, _wakeup: bool) -> Result<Option<Atqa>> {
        Err(self.unsupported("request"))
    }

    fn select(
        &self,
        _chip: &mut dyn ChipDriver,
        _disable_anti_collision: bool,
    ) -> Result<(Uid, Sak)> {
        Err(self.unsupported("select"))
    }

    fn halt(&self, _chip: &mut dyn ChipDriver) -> Result<bool> {
        Err(self.unsupported("halt"))
    }
}
