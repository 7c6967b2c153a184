use std::f64::consts::{PI, TAU};

use crate::error::RuntimeError;

/// Largest `n` for which `n!` is finite in an `f64`.
const MAX_EXACT_FACTORIAL: f64 = 170.0;

/// Returns `true` if `a` and `b` differ by less than machine epsilon.
///
/// # Example
/// ```
/// use unitcalc::util::num::doubles_equal;
///
/// assert!(doubles_equal(1.0 / 3.0, 0.333_333_333_333_333_3));
/// assert!(!doubles_equal(0.1, 0.2));
/// ```
#[must_use]
pub fn doubles_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

/// Returns `true` if `value` is finite and has no fractional part.
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Raises `base` to `exponent`, rejecting results that are not real numbers.
///
/// Rules, in order:
/// - a negative base with an exponent of exactly `1/3` yields the real cube
///   root;
/// - a negative base with any other non-integer exponent is an error;
/// - a zero base with a non-positive exponent is an error;
/// - otherwise the result is `base.powf(exponent)`.
///
/// # Errors
/// - [`RuntimeError::FractionalPowerOfNegative`] for a negative base and a
///   fractional exponent other than `1/3`.
/// - [`RuntimeError::UndefinedPower`] for `0 ^ e` with `e <= 0`.
///
/// # Example
/// ```
/// use unitcalc::{error::RuntimeError, util::num::power};
///
/// assert_eq!(power(2.0, 10.0).unwrap(), 1024.0);
/// assert_eq!(power(-8.0, 1.0 / 3.0).unwrap(), -2.0);
/// assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
/// assert_eq!(power(-2.0, 0.5), Err(RuntimeError::FractionalPowerOfNegative));
/// assert_eq!(power(0.0, -1.0), Err(RuntimeError::UndefinedPower));
/// ```
pub fn power(base: f64, exponent: f64) -> Result<f64, RuntimeError> {
    if base < 0.0 {
        if doubles_equal(exponent, 1.0 / 3.0) {
            return Ok(base.cbrt());
        }
        if !is_integral(exponent) {
            return Err(RuntimeError::FractionalPowerOfNegative);
        }
    }
    if base == 0.0 && exponent <= 0.0 {
        return Err(RuntimeError::UndefinedPower);
    }

    Ok(base.powf(exponent))
}

/// Largest argument whose Gamma value is still a finite `f64`.
const MAX_GAMMA_ARGUMENT: f64 = 171.624_376_956_302_7;

/// Computes the Gamma function Γ(z) using the Lanczos approximation.
///
/// For `z < 0.5`, the reflection formula is used:
/// `Γ(z) = π / (sin(πz) · Γ(1 − z))`. Arguments past the point where the
/// result overflows an `f64` give positive infinity.
///
/// # Example
/// ```
/// use unitcalc::util::num::gamma;
///
/// assert!((gamma(5.0) - 24.0).abs() < 1e-9);
/// assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
/// assert_eq!(gamma(1000.0), f64::INFINITY);
/// assert_eq!(gamma(f64::INFINITY), f64::INFINITY);
/// ```
#[must_use]
pub fn gamma(z: f64) -> f64 {
    // Lanczos coefficients, g = 7, n = 9.
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z < 0.5 {
        return PI / ((PI * z).sin() * gamma(1.0 - z));
    }
    if z > MAX_GAMMA_ARGUMENT {
        return f64::INFINITY;
    }

    let z_minus_1 = z - 1.0;
    let mut x = COEFFS[0];
    let mut offset = 1.0;
    for &c in &COEFFS[1..] {
        x += c / (z_minus_1 + offset);
        offset += 1.0;
    }

    let t = z_minus_1 + G + 0.5;

    TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x
}

/// Computes `x!` as `Γ(x + 1)` for any non-negative real `x`.
///
/// Integral arguments up to 170 are computed as an exact running product so
/// that results such as `20!` carry no approximation error; everything else
/// goes through [`gamma`].
///
/// # Errors
/// Returns [`RuntimeError::NegativeFactorial`] if `x` is negative.
///
/// # Example
/// ```
/// use unitcalc::util::num::factorial;
///
/// assert_eq!(factorial(5.0).unwrap(), 120.0);
/// assert_eq!(factorial(20.0).unwrap(), 2_432_902_008_176_640_000.0);
/// assert!((factorial(0.5).unwrap() - 0.886_226_925_452_758).abs() < 1e-12);
/// assert_eq!(factorial(1_000_000.0).unwrap(), f64::INFINITY);
/// assert_eq!(factorial(800.5).unwrap(), f64::INFINITY);
/// assert!(factorial(-1.0).is_err());
/// ```
pub fn factorial(x: f64) -> Result<f64, RuntimeError> {
    if x < 0.0 {
        return Err(RuntimeError::NegativeFactorial(x));
    }

    if is_integral(x) && x <= MAX_EXACT_FACTORIAL {
        let mut product = 1.0;
        let mut k = 2.0;
        while k <= x {
            product *= k;
            k += 1.0;
        }
        return Ok(product);
    }

    Ok(gamma(x + 1.0))
}

/// Converts an integral `f64` to an `i32`, or returns `None` if the value is
/// fractional, non-finite or out of range.
///
/// # Example
/// ```
/// use unitcalc::util::num::f64_to_i32_checked;
///
/// assert_eq!(f64_to_i32_checked(-3.0), Some(-3));
/// assert_eq!(f64_to_i32_checked(2.5), None);
/// assert_eq!(f64_to_i32_checked(1e20), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn f64_to_i32_checked(value: f64) -> Option<i32> {
    if !is_integral(value) || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}
