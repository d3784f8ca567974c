// libpcd/src/device/mod.rs

pub mod builder;
pub mod capability;
pub mod config;
pub mod handle;
pub mod handshake;
pub mod models;
pub mod registers;

pub use builder::ReaderBuilder;
pub use capability::Capabilities;
pub use config::ReaderConfig;
pub use handle::{Initialized, Reader, Uninitialized};
pub use models::{ChipDriver, ChipState, create_driver_for};
