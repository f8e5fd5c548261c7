#![no_std]

// The standard library is only linked for the `std` feature and for tests.
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod bitrev;
pub mod common;
pub mod fft;
pub mod metrics;
pub mod minifloat;

pub use common::{FftError, FftProcess, MAX_N, MAX_STAGES};
pub use fft::{FftEngine, PrecisionPlan, StagePrecision};
pub use minifloat::{ComplexMinifloat, Minifloat, Precision};
