// libpcd/src/device/builder.rs

use std::time::Duration;

use crate::device::config::ReaderConfig;
use crate::device::handle::{Initialized, Reader, Uninitialized};
use crate::transport::RegisterBus;
use crate::types::{CardProtocol, ChipKind};
use crate::{Error, Result};

/// Helper to construct a Reader with optional configuration.
#[derive(Default)]
pub struct ReaderBuilder {
    bus: Option<Box<dyn RegisterBus>>,
    config: ReaderConfig,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the host register bus (e.g. a MockBus in tests)
    pub fn with_bus(mut self, bus: Box<dyn RegisterBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn chip(mut self, chip: ChipKind) -> Self {
        self.config.chip = chip;
        self
    }

    /// Protocol applied during initialization; `None` skips it.
    pub fn protocol(mut self, protocol: Option<CardProtocol>) -> Self {
        self.config.protocol = protocol;
        self
    }

    pub fn transceive_timeout(mut self, timeout: Duration) -> Self {
        self.config.transceive_timeout = timeout;
        self
    }

    /// Consume the builder and return an uninitialized Reader.
    /// Requires a bus; otherwise returns BusNotConfigured.
    pub fn build_uninitialized(self) -> Result<Reader<Uninitialized>> {
        match self.bus {
            Some(bus) => Ok(Reader::new(bus, self.config)),
            None => Err(Error::BusNotConfigured),
        }
    }

    /// Build and initialize in one step.
    pub fn build(self) -> Result<Reader<Initialized>> {
        self.build_uninitialized()?.initialize()
    }
}
