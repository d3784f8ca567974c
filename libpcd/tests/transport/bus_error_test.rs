#[path = "../common/mod.rs"]
mod common;

use libpcd::device::models::{ChipDriver, Mfrc522, Pn512};
use libpcd::transport::MockBus;
use libpcd::Error;

#[test]
fn failed_reads_propagate_through_drivers() {
    let bus = MockBus::new();
    bus.fail_reads();
    let mut chip = Mfrc522::new(Box::new(bus.clone()));
    let err = chip.version().unwrap_err();
    assert!(matches!(err, Error::Bus(_)));
    assert!(!err.is_usage());

    let mut chip = Pn512::new(Box::new(bus));
    assert!(matches!(chip.antenna_on(), Err(Error::Bus(_))));
}
