// libpcd/src/transport/mock.rs

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::transport::traits::RegisterBus;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct MockState {
    registers: HashMap<u8, u8>,
    scripted: HashMap<u8, VecDeque<u8>>,
    writes: Vec<(u8, Vec<u8>)>,
    reads: Vec<u8>,
    startups: usize,
    fail_reads: bool,
    failing: HashSet<u8>,
}

/// Mock register bus for unit tests.
///
/// Behaves like a plain register file: a read returns the last value
/// written to that address. Reads can be scripted per register; scripted
/// values are returned first, in order. Clones share state, so a test can
/// keep one handle while a driver owns another.
#[derive(Debug, Default, Clone)]
pub struct MockBus {
    state: Rc<RefCell<MockState>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the register file value for `address`.
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Queue values returned by the next reads of `address`.
    pub fn script_reads(&self, address: u8, values: &[u8]) {
        self.state
            .borrow_mut()
            .scripted
            .entry(address)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Make every subsequent read fail with a bus error.
    pub fn fail_reads(&self) {
        self.state.borrow_mut().fail_reads = true;
    }

    /// Make subsequent reads of `address` fail with a bus error.
    pub fn fail_reads_of(&self, address: u8) {
        self.state.borrow_mut().failing.insert(address);
    }

    /// Drop every injected read fault.
    pub fn clear_faults(&self) {
        let mut state = self.state.borrow_mut();
        state.fail_reads = false;
        state.failing.clear();
    }

    /// Every write so far as `(address, data)`.
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.state.borrow().writes.clone()
    }

    /// Writes to a single address, in order.
    pub fn writes_to(&self, address: u8) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, d)| d.clone())
            .collect()
    }

    /// Addresses read so far, in order.
    pub fn reads(&self) -> Vec<u8> {
        self.state.borrow().reads.clone()
    }

    pub fn register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    pub fn startup_count(&self) -> usize {
        self.state.borrow().startups
    }

    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.writes.clear();
        state.reads.clear();
    }
}

impl RegisterBus for MockBus {
    fn read_register(&mut self, address: u8) -> Result<u8> {
        let mut state = self.state.borrow_mut();
        if state.fail_reads || state.failing.contains(&address) {
            return Err(Error::Bus(format!("read of {:#04x} failed", address)));
        }
        state.reads.push(address);
        if let Some(value) = state.scripted.get_mut(&address).and_then(|q| q.pop_front()) {
            return Ok(value);
        }
        Ok(state.registers.get(&address).copied().unwrap_or(0))
    }

    fn write_register(&mut self, address: u8, data: &[u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(&last) = data.last() {
            state.registers.insert(address, last);
        }
        state.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn startup(&mut self) -> Result<()> {
        self.state.borrow_mut().startups += 1;
        Ok(())
    }
}
