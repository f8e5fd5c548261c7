// src/fft/plan.rs

use crate::common::{FftError, MAX_STAGES, checked_log2};
use crate::minifloat::Precision;

/// Multiplier and adder precision of one FFT stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagePrecision {
    pub mult: Precision,
    pub add: Precision,
}

impl StagePrecision {
    pub const F4_F4: Self = Self::new(Precision::F4, Precision::F4);
    pub const F8_F8: Self = Self::new(Precision::F8, Precision::F8);
    /// F8 product, narrowed to F4 for the add/subtract.
    pub const F8_F4: Self = Self::new(Precision::F8, Precision::F4);
    /// F4 product, widened to F8 for the add/subtract.
    pub const F4_F8: Self = Self::new(Precision::F4, Precision::F8);

    #[inline]
    pub const fn new(mult: Precision, add: Precision) -> Self {
        Self { mult, add }
    }

    /// Builds a stage from `(mult, add)` flags, `0` = F4 and nonzero = F8.
    #[inline]
    pub const fn from_flags(mult: u8, add: u8) -> Self {
        Self::new(Precision::from_flag(mult), Precision::from_flag(add))
    }
}

/// Per-stage precision selection for one run, `log2(N)` entries long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionPlan {
    stages: [StagePrecision; MAX_STAGES],
    len: usize,
}

impl PrecisionPlan {
    pub fn new(stages: &[StagePrecision]) -> Result<Self, FftError> {
        if stages.len() > MAX_STAGES {
            return Err(FftError::TooManyStages(stages.len()));
        }
        let mut plan = Self {
            stages: [StagePrecision::F8_F8; MAX_STAGES],
            len: stages.len(),
        };
        plan.stages[..stages.len()].copy_from_slice(stages);
        Ok(plan)
    }

    /// The same precision pair for every stage of an `n`-point transform.
    pub fn uniform(n: usize, stage: StagePrecision) -> Result<Self, FftError> {
        let len = checked_log2(n)?;
        Ok(Self {
            stages: [stage; MAX_STAGES],
            len,
        })
    }

    /// Builds a plan from `(mult, add)` flag pairs, `0` = F4 and nonzero = F8.
    pub fn from_flags(flags: &[(u8, u8)]) -> Result<Self, FftError> {
        if flags.len() > MAX_STAGES {
            return Err(FftError::TooManyStages(flags.len()));
        }
        let mut stages = [StagePrecision::F8_F8; MAX_STAGES];
        for (stage, &(mult, add)) in stages.iter_mut().zip(flags) {
            *stage = StagePrecision::from_flags(mult, add);
        }
        Self::new(&stages[..flags.len()])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn stages(&self) -> &[StagePrecision] {
        &self.stages[..self.len]
    }

    /// Precision pair of `stage`. Panics if `stage >= len()`.
    #[inline]
    pub fn stage(&self, stage: usize) -> StagePrecision {
        self.stages()[stage]
    }

    /// Precision of the final results: the add precision of the last stage.
    pub fn output_precision(&self) -> Option<Precision> {
        self.stages().last().map(|stage| stage.add)
    }

    /// Checks that this plan has exactly one entry per stage of an `n`-point transform.
    pub fn validate_for(&self, n: usize) -> Result<(), FftError> {
        let expected = checked_log2(n)?;
        if self.len != expected {
            return Err(FftError::PlanLengthMismatch {
                expected,
                actual: self.len,
            });
        }
        Ok(())
    }

    /// Counts how many butterflies of an `n`-point run use each multiplier and adder format.
    pub fn usage(&self, n: usize) -> Result<PrecisionUsage, FftError> {
        self.validate_for(n)?;
        let per_stage = n / 2;
        let mut usage = PrecisionUsage::default();
        for stage in self.stages() {
            usage.butterflies += per_stage;
            match stage.mult {
                Precision::F4 => usage.f4_mult += per_stage,
                Precision::F8 => usage.f8_mult += per_stage,
            }
            match stage.add {
                Precision::F4 => usage.f4_add += per_stage,
                Precision::F8 => usage.f8_add += per_stage,
            }
        }
        Ok(usage)
    }

    /// Per-stage breakdown of [`usage`](Self::usage): `(stage, precision, butterflies)`.
    pub fn stage_usage(
        &self,
        n: usize,
    ) -> Result<impl Iterator<Item = (usize, StagePrecision, usize)> + '_, FftError> {
        self.validate_for(n)?;
        Ok(self
            .stages()
            .iter()
            .enumerate()
            .map(move |(stage, &precision)| (stage, precision, n / 2)))
    }
}

impl Default for PrecisionPlan {
    /// An empty plan.
    fn default() -> Self {
        Self {
            stages: [StagePrecision::F8_F8; MAX_STAGES],
            len: 0,
        }
    }
}

/// Butterfly counts per arithmetic format over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrecisionUsage {
    pub butterflies: usize,
    pub f4_mult: usize,
    pub f8_mult: usize,
    pub f4_add: usize,
    pub f8_add: usize,
}

impl PrecisionUsage {
    /// Share of multipliers running in F8, in `[0, 1]`.
    pub fn f8_mult_ratio(&self) -> f64 {
        ratio(self.f8_mult, self.butterflies)
    }

    /// Share of adders running in F8, in `[0, 1]`.
    pub fn f8_add_ratio(&self) -> f64 {
        ratio(self.f8_add, self.butterflies)
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { part as f64 / total as f64 }
}
