use super::*;
use crate::minifloat::Precision;
use num_complex::Complex64;

fn c(precision: Precision, re: f64, im: f64) -> ComplexMinifloat {
    ComplexMinifloat::from_complex64(precision, Complex64::new(re, im))
}

fn assert_complex_close(val: ComplexMinifloat, expected_re: f64, expected_im: f64, tolerance: f64) {
    let v = val.to_complex64();
    let dist = (v - Complex64::new(expected_re, expected_im)).norm_sqr();
    assert!(
        dist <= tolerance * tolerance,
        "Error too large. Expected: ({:.4}, {:.4}), Got: ({:.4}, {:.4})",
        expected_re,
        expected_im,
        v.re,
        v.im
    );
}

#[test]
fn test_identity_butterfly_f8() {
    let one = c(Precision::F8, 1.0, 0.0);
    let (x, y) = butterfly(one, one, one, StagePrecision::F8_F8);
    assert_complex_close(x, 2.0, 0.0, 0.125);
    assert_complex_close(y, 0.0, 0.0, 0.125);
    assert_eq!(y, ComplexMinifloat::zero(Precision::F8));
}

#[test]
fn test_all_precision_combinations() {
    let combos = [
        StagePrecision::F4_F4,
        StagePrecision::F8_F8,
        StagePrecision::F8_F4,
        StagePrecision::F4_F8,
    ];
    for precision in combos {
        let a = c(precision.mult, 1.0, 0.5);
        let b = c(precision.mult, 1.0, -1.0);
        let w = c(precision.mult, 0.0, -1.0);
        // W·B = (0 - i)(1 - i) = -1 - i
        let (x, y) = butterfly(a, b, w, precision);
        assert_eq!(x.precision(), precision.add, "{:?}", precision);
        assert_eq!(y.precision(), precision.add, "{:?}", precision);
        assert_complex_close(x, 0.0, -0.5, 1e-9);
        assert_complex_close(y, 2.0, 1.5, 1e-9);
    }
}

#[test]
fn test_mult_f8_add_f4_narrows_product() {
    // W·B = 0.6875 in F8 (0.7071 quantized), which narrows to the F4 subnormal 0.5.
    let w = c(Precision::F8, core::f64::consts::FRAC_1_SQRT_2, 0.0);
    let a = c(Precision::F8, 1.0, 0.0);
    let b = c(Precision::F8, 1.0, 0.0);
    let (x, y) = butterfly(a, b, w, StagePrecision::F8_F4);
    assert_complex_close(x, 1.5, 0.0, 1e-9);
    assert_complex_close(y, 0.5, 0.0, 1e-9);
}

#[test]
fn test_mult_f4_add_f8_widens() {
    // 1.5 * 1.5 = 2.25 rounds to 2 in F4; the add then runs exactly in F8.
    let a = c(Precision::F4, 0.5, 0.0);
    let b = c(Precision::F4, 1.5, 0.0);
    let w = c(Precision::F4, 1.5, 0.0);
    let (x, y) = butterfly(a, b, w, StagePrecision::F4_F8);
    assert_eq!(x.precision(), Precision::F8);
    assert_complex_close(x, 2.5, 0.0, 1e-9);
    assert_complex_close(y, -1.5, 0.0, 1e-9);
}

#[test]
fn test_operands_in_other_precision_are_converted() {
    // A arrives in F8 for an all-F4 stage; 1.75 narrows to 2 before the add.
    let a = c(Precision::F8, 1.75, 0.0);
    let b = c(Precision::F4, 1.0, 0.0);
    let w = c(Precision::F4, 1.0, 0.0);
    let (x, y) = butterfly(a, b, w, StagePrecision::F4_F4);
    assert_complex_close(x, 3.0, 0.0, 1e-9);
    assert_complex_close(y, 1.0, 0.0, 1e-9);
}
