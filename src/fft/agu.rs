// src/fft/agu.rs

use crate::common::{FftError, checked_log2};

/// Operand and twiddle addresses of one butterfly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addresses {
    pub a: usize,
    pub b: usize,
    /// Twiddle exponent `k` of `W_N^k`.
    pub twiddle: usize,
}

/// Completion pulses returned by [`AddressGenerator::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// The butterfly just retired was the last one of its stage.
    pub done_stage: bool,
    /// The butterfly just retired was the last one of the transform.
    pub done_fft: bool,
}

/// Stage/group/pair counters of an in-place radix-2 DIT pass.
///
/// At stage `s` the stride is `2^s`, each group spans `2·stride` slots and there are
/// `N / (2·stride)` groups of `stride` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressGenerator {
    n: usize,
    log2n: usize,
    stage: usize,
    group: usize,
    pair: usize,
    stride: usize,
    done_fft: bool,
}

impl AddressGenerator {
    pub fn new(n: usize) -> Result<Self, FftError> {
        let log2n = checked_log2(n)?;
        Ok(Self {
            n,
            log2n,
            stage: 0,
            group: 0,
            pair: 0,
            stride: 1,
            done_fft: false,
        })
    }

    /// Returns to `(stage, group, pair, stride) = (0, 0, 0, 1)` and clears `done_fft`.
    pub fn reset(&mut self) {
        self.stage = 0;
        self.group = 0;
        self.pair = 0;
        self.stride = 1;
        self.done_fft = false;
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn stages(&self) -> usize {
        self.log2n
    }

    #[inline]
    pub fn stage(&self) -> usize {
        self.stage
    }

    #[inline]
    pub fn group(&self) -> usize {
        self.group
    }

    #[inline]
    pub fn pair(&self) -> usize {
        self.pair
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn done_fft(&self) -> bool {
        self.done_fft
    }

    #[inline]
    fn num_groups(&self) -> usize {
        self.n / (2 * self.stride)
    }

    /// Addresses of the current butterfly.
    pub fn addresses(&self) -> Addresses {
        let a = self.group * 2 * self.stride + self.pair;
        Addresses {
            a,
            b: a + self.stride,
            twiddle: self.pair * self.num_groups(),
        }
    }

    /// Retires the current butterfly. Does nothing once `done_fft` is set.
    pub fn advance(&mut self) -> Advance {
        if self.done_fft {
            return Advance::default();
        }

        self.pair += 1;
        if self.pair < self.stride {
            return Advance::default();
        }
        self.pair = 0;

        self.group += 1;
        if self.group < self.num_groups() {
            return Advance::default();
        }
        self.group = 0;

        if self.stage + 1 == self.log2n {
            self.done_fft = true;
        } else {
            self.stage += 1;
            self.stride <<= 1;
        }

        Advance {
            done_stage: true,
            done_fft: self.done_fft,
        }
    }
}

impl Default for AddressGenerator {
    /// The generator of the smallest transform, `N = 2`.
    fn default() -> Self {
        Self {
            n: 2,
            log2n: 1,
            stage: 0,
            group: 0,
            pair: 0,
            stride: 1,
            done_fft: false,
        }
    }
}

#[cfg(test)]
#[path = "agu_tests.rs"]
mod tests;
