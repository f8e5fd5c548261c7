// src/common.rs

use crate::fft::PrecisionPlan;

/// Largest transform the engine supports. Sizes the twiddle table and both memory banks.
pub const MAX_N: usize = 1024;

/// log2(MAX_N): the longest precision plan a run can carry.
pub const MAX_STAGES: usize = MAX_N.trailing_zeros() as usize;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FftError {
    /// N is not a power of two in `[2, MAX_N]`.
    UnsupportedSize(usize),
    /// A previous unsupported size latched the configuration error; only a reset clears it.
    ConfigurationLocked,
    PlanLengthMismatch { expected: usize, actual: usize },
    TooManyStages(usize),
    SizeMismatch,
    Busy,
}

use core::fmt;

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::UnsupportedSize(n) => {
                write!(f, "FFT size {} is not a power of two in [2, {}]", n, MAX_N)
            }
            FftError::ConfigurationLocked => {
                write!(f, "Configuration error is latched, reset the engine")
            }
            FftError::PlanLengthMismatch { expected, actual } => write!(
                f,
                "Precision plan has {} stages, FFT size requires {}",
                actual, expected
            ),
            FftError::TooManyStages(stages) => write!(
                f,
                "Precision plan has {} stages, at most {} are supported",
                stages, MAX_STAGES
            ),
            FftError::SizeMismatch => write!(f, "Data buffer size does not match FFT size"),
            FftError::Busy => write!(f, "Engine is running a transform"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Returns log2(n) when `n` is a supported transform size.
pub fn checked_log2(n: usize) -> Result<usize, FftError> {
    if n < 2 || n > MAX_N || !n.is_power_of_two() {
        return Err(FftError::UnsupportedSize(n));
    }
    Ok(n.trailing_zeros() as usize)
}

pub trait FftProcess<T> {
    fn process(&mut self, buffer: &mut [T], plan: &PrecisionPlan) -> Result<(), FftError>;
}
