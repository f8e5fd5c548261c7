// src/fft/memory.rs

use crate::common::MAX_N;
use crate::minifloat::{ComplexMinifloat, Precision};

/// One storage slot. Both encodings of the stored value are kept side by side; the
/// precision of the access picks which one is authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryWord {
    pub f8: u16,
    pub f4: u8,
}

impl MemoryWord {
    pub fn encode(value: ComplexMinifloat) -> Self {
        Self {
            f8: value.convert(Precision::F8).pack(),
            f4: value.convert(Precision::F4).pack() as u8,
        }
    }

    pub fn decode(self, precision: Precision) -> ComplexMinifloat {
        match precision {
            Precision::F8 => ComplexMinifloat::unpack(Precision::F8, self.f8),
            Precision::F4 => ComplexMinifloat::unpack(Precision::F4, self.f4 as u16),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReadRequest {
    address: usize,
    precision: Precision,
}

/// Two banks of `MAX_N` slots. Reads come from the active bank with one step of latency,
/// writes land in the other bank, and [`swap`](Self::swap) exchanges their roles.
#[derive(Clone)]
pub struct PingPongMemory {
    banks: [[MemoryWord; MAX_N]; 2],
    read_bank: usize,
    pending: Option<ReadRequest>,
    data: ComplexMinifloat,
}

impl PingPongMemory {
    pub fn new() -> Self {
        Self {
            banks: [[MemoryWord::default(); MAX_N]; 2],
            read_bank: 0,
            pending: None,
            data: ComplexMinifloat::zero(Precision::F8),
        }
    }

    /// Zero-fills both banks, selects bank 0 for reads and drops any read in flight.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn read_bank(&self) -> usize {
        self.read_bank
    }

    #[inline]
    pub fn write_bank(&self) -> usize {
        self.read_bank ^ 1
    }

    /// Presents `address` to the read port. The value shows up in [`data`](Self::data)
    /// after the next [`clock`](Self::clock).
    pub fn issue_read(&mut self, address: usize, precision: Precision) {
        self.pending = Some(ReadRequest { address, precision });
    }

    /// Ends the current step: a read issued during it is resolved into the data register.
    pub fn clock(&mut self) {
        if let Some(request) = self.pending.take() {
            self.data = self.banks[self.read_bank][request.address].decode(request.precision);
        }
    }

    /// Read data register: the value of the last resolved read.
    #[inline]
    pub fn data(&self) -> ComplexMinifloat {
        self.data
    }

    /// Writes `value` into the write bank.
    pub fn write(&mut self, address: usize, value: ComplexMinifloat) {
        self.banks[self.write_bank()][address] = MemoryWord::encode(value);
    }

    /// Flips the read/write roles of the two banks.
    pub fn swap(&mut self) {
        self.read_bank ^= 1;
    }

    /// Host access: stores `value` into the read bank, where the next run starts from.
    pub fn load(&mut self, address: usize, value: ComplexMinifloat) {
        self.banks[self.read_bank][address] = MemoryWord::encode(value);
    }

    /// Host access: the value in the read bank at `address`, without latency.
    pub fn peek(&self, address: usize, precision: Precision) -> ComplexMinifloat {
        self.banks[self.read_bank][address].decode(precision)
    }

    /// Raw slot of `bank`.
    pub fn word(&self, bank: usize, address: usize) -> MemoryWord {
        self.banks[bank][address]
    }
}

impl Default for PingPongMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
