use super::*;
use num_complex::Complex64;

fn c(precision: Precision, re: f64, im: f64) -> ComplexMinifloat {
    ComplexMinifloat::from_complex64(precision, Complex64::new(re, im))
}

#[test]
fn test_word_keeps_both_encodings() {
    let word = MemoryWord::encode(c(Precision::F8, 1.25, -3.0));
    assert_eq!(word.decode(Precision::F8).to_complex64(), Complex64::new(1.25, -3.0));
    // 1.25 narrows to 1.5 (tie rounds up), -3.0 is exact.
    assert_eq!(word.decode(Precision::F4).to_complex64(), Complex64::new(1.5, -3.0));

    let word = MemoryWord::encode(c(Precision::F4, 0.5, 6.0));
    assert_eq!(word.decode(Precision::F8).to_complex64(), Complex64::new(0.5, 6.0));
    assert_eq!(word.decode(Precision::F4).to_complex64(), Complex64::new(0.5, 6.0));
}

#[test]
fn test_read_has_one_step_latency() {
    let mut mem = PingPongMemory::new();
    let v = c(Precision::F8, 2.0, 1.0);
    mem.load(5, v);

    mem.issue_read(5, Precision::F8);
    assert_eq!(mem.data(), ComplexMinifloat::zero(Precision::F8));
    mem.clock();
    assert_eq!(mem.data(), v);

    // The register holds its value until another read resolves.
    mem.clock();
    assert_eq!(mem.data(), v);
}

#[test]
fn test_reads_resolve_in_issue_order() {
    let mut mem = PingPongMemory::new();
    let a = c(Precision::F8, 1.0, 0.0);
    let b = c(Precision::F8, -1.0, 0.0);
    mem.load(0, a);
    mem.load(1, b);

    mem.issue_read(0, Precision::F8);
    mem.clock();
    let first = mem.data();
    mem.issue_read(1, Precision::F8);
    assert_eq!(mem.data(), a);
    mem.clock();
    assert_eq!((first, mem.data()), (a, b));
}

#[test]
fn test_writes_land_in_opposite_bank() {
    let mut mem = PingPongMemory::new();
    let v = c(Precision::F8, 4.0, -4.0);
    assert_eq!((mem.read_bank(), mem.write_bank()), (0, 1));

    mem.write(3, v);
    assert_eq!(mem.word(0, 3), MemoryWord::default());
    assert_eq!(mem.word(1, 3), MemoryWord::encode(v));
    assert_eq!(mem.peek(3, Precision::F8), ComplexMinifloat::zero(Precision::F8));

    mem.swap();
    assert_eq!((mem.read_bank(), mem.write_bank()), (1, 0));
    assert_eq!(mem.peek(3, Precision::F8), v);

    mem.issue_read(3, Precision::F4);
    mem.clock();
    assert_eq!(mem.data().to_complex64(), Complex64::new(4.0, -4.0));
    assert_eq!(mem.data().precision(), Precision::F4);
}

#[test]
fn test_reset_clears_everything() {
    let mut mem = PingPongMemory::new();
    mem.load(0, c(Precision::F8, 1.0, 1.0));
    mem.write(0, c(Precision::F8, 1.0, 1.0));
    mem.swap();
    mem.issue_read(0, Precision::F8);
    mem.reset();

    assert_eq!(mem.read_bank(), 0);
    mem.clock();
    assert_eq!(mem.data(), ComplexMinifloat::zero(Precision::F8));
    assert_eq!(mem.word(0, 0), MemoryWord::default());
    assert_eq!(mem.word(1, 0), MemoryWord::default());
}
