// src/minifloat/complex.rs

use super::arith::{add_sub, multiply};
use super::types::ComplexMinifloat;

/// Complex multiply built from four scalar products:
/// `(ar·br − ai·bi) + (ar·bi + ai·br)i`.
///
/// The result takes `a`'s precision; `b` is converted first if needed.
pub fn complex_multiply(a: ComplexMinifloat, b: ComplexMinifloat) -> ComplexMinifloat {
    let b = b.convert(a.precision());

    let ac = multiply(a.re, b.re);
    let bd = multiply(a.im, b.im);
    let ad = multiply(a.re, b.im);
    let bc = multiply(a.im, b.re);

    ComplexMinifloat {
        re: add_sub(ac, bd, true),
        im: add_sub(ad, bc, false),
    }
}

/// Component-wise complex add or subtract. Real and imaginary parts never interact.
pub fn complex_add_sub(a: ComplexMinifloat, b: ComplexMinifloat, subtract: bool) -> ComplexMinifloat {
    let b = b.convert(a.precision());
    ComplexMinifloat {
        re: add_sub(a.re, b.re, subtract),
        im: add_sub(a.im, b.im, subtract),
    }
}

#[cfg(test)]
#[path = "complex_tests.rs"]
mod tests;
