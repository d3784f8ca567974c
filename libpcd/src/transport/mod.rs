// libpcd/src/transport/mod.rs

pub mod mock;
pub mod traits;

pub use mock::MockBus;
pub use traits::RegisterBus;
