// src/fft/butterfly.rs

use super::plan::StagePrecision;
use crate::minifloat::ComplexMinifloat;

/// One radix-2 decimation-in-time butterfly: `X = A + W·B`, `Y = A − W·B`.
///
/// `W·B` is computed in `precision.mult`; `A` and the product are then brought to
/// `precision.add` (a no-op when the two match) for the add and subtract. Both outputs
/// are in `precision.add`.
pub fn butterfly(
    a: ComplexMinifloat,
    b: ComplexMinifloat,
    w: ComplexMinifloat,
    precision: StagePrecision,
) -> (ComplexMinifloat, ComplexMinifloat) {
    // Butterfly: t = b * w
    let t = b.convert(precision.mult) * w.convert(precision.mult);

    let a = a.convert(precision.add);
    let t = t.convert(precision.add);

    (a + t, a - t)
}

#[cfg(test)]
#[path = "butterfly_tests.rs"]
mod tests;
