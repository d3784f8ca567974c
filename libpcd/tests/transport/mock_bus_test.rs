#[path = "../common/mod.rs"]
mod common;

use libpcd::transport::{MockBus, RegisterBus};

#[test]
fn scripted_reads_take_priority_over_register_file() {
    let mut bus = MockBus::new();
    bus.write_register(0x04, &[0x7F]).unwrap();
    bus.script_reads(0x04, &[0x30, 0x01]);

    assert_eq!(bus.read_register(0x04).unwrap(), 0x30);
    assert_eq!(bus.read_register(0x04).unwrap(), 0x01);
    assert_eq!(bus.read_register(0x04).unwrap(), 0x7F);
    assert_eq!(bus.reads(), vec![0x04, 0x04, 0x04]);
}

#[test]
fn fifo_writes_are_logged_whole() {
    let bus = MockBus::new();
    let mut boxed: Box<dyn RegisterBus> = Box::new(bus.clone());
    boxed.write_register(0x09, &[0x93, 0x20]).unwrap();
    boxed.startup().unwrap();

    assert_eq!(bus.writes_to(0x09), vec![vec![0x93, 0x20]]);
    assert_eq!(bus.register(0x09), 0x20);
    assert_eq!(bus.startup_count(), 1);
}
