//! Property-based tests using QuickCheck

use quickcheck::{QuickCheck, TestResult};
use unitcalc::{Parser, builtin_unit_system, builtin_units};

fn eval(src: &str) -> f64 {
    Parser::default().evaluate(src)
                     .unwrap_or_else(|e| panic!("`{src}` failed: {e}"))
                     .value()
}

/// Property: every finite literal evaluates to itself, in decimal and in
/// exponent form, with or without a sign prefix.
#[test]
fn prop_literal_round_trip() {
    fn prop(x: f64) -> TestResult {
        if !x.is_finite() {
            return TestResult::discard();
        }
        let decimal = format!("{}", x.abs());
        let exponent = format!("{:e}", x.abs());

        TestResult::from_bool(eval(&decimal) == x.abs()
                              && eval(&exponent) == x.abs()
                              && eval(&format!("-{decimal}")) == -x.abs()
                              && eval(&format!("+{exponent}")) == x.abs())
    }

    QuickCheck::new().tests(200).quickcheck(prop as fn(f64) -> TestResult);
}

/// Property: converting to another unit of the same dimension and back
/// returns the original value.
#[test]
fn prop_unit_conversion_round_trip() {
    fn prop(value: i32, from: u8, to: u8) -> TestResult {
        let units = builtin_units();
        let a = &units[usize::from(from) % units.len()];
        let b = &units[usize::from(to) % units.len()];
        if a.dimension != b.dimension {
            return TestResult::discard();
        }

        let system = builtin_unit_system();
        let v = f64::from(value) / 8.0;
        let there = system.convert(v, &a.name, &b.name).unwrap();
        let back = system.convert(there, &b.name, &a.name).unwrap();

        TestResult::from_bool((back - v).abs() <= 1e-9 * v.abs().max(1000.0))
    }

    QuickCheck::new().tests(500)
                     .max_tests(20_000)
                     .quickcheck(prop as fn(i32, u8, u8) -> TestResult);
}

/// Property: `-`, `/` and `%` group to the left.
#[test]
fn prop_left_associative() {
    fn prop(a: i16, b: i16, c: i16) -> TestResult {
        if b == 0 || c == 0 {
            return TestResult::discard();
        }
        let (x, y, z) = (f64::from(a), f64::from(b), f64::from(c));

        TestResult::from_bool(eval(&format!("{a} - {b} - {c}")) == (x - y) - z
                              && eval(&format!("{a} / {b} / {c}")) == (x / y) / z
                              && eval(&format!("{a} % {b} % {c}")) == (x % y) % z)
    }

    QuickCheck::new().tests(200).quickcheck(prop as fn(i16, i16, i16) -> TestResult);
}

/// Property: `^` groups to the right.
#[test]
fn prop_power_right_associative() {
    fn prop(a: u8, b: u8, c: u8) -> TestResult {
        let (a, b, c) = (a % 4 + 1, b % 3 + 1, c % 3);
        let expected = f64::from(a).powf(f64::from(b).powf(f64::from(c)));

        TestResult::from_bool(eval(&format!("{a} ^ {b} ^ {c}")) == expected)
    }

    QuickCheck::new().tests(100).quickcheck(prop as fn(u8, u8, u8) -> TestResult);
}

/// Property: a leading minus negates the whole power.
#[test]
fn prop_unary_minus_binds_looser_than_power() {
    fn prop(a: u8, b: u8) -> bool {
        let (a, b) = (a % 10 + 1, b % 5);
        eval(&format!("-{a} ^ {b}")) == -f64::from(a).powf(f64::from(b))
    }

    QuickCheck::new().tests(100).quickcheck(prop as fn(u8, u8) -> bool);
}
