// src/fft/mod.rs

pub mod agu;
pub mod butterfly;
pub mod controller;
pub mod memory;
pub mod plan;
pub mod twiddles;

pub use agu::{Addresses, AddressGenerator, Advance};
pub use butterfly::butterfly;
pub use controller::{FftEngine, Signals, State};
pub use memory::{MemoryWord, PingPongMemory};
pub use plan::{PrecisionPlan, PrecisionUsage, StagePrecision};
pub use twiddles::TwiddleTable;
