/// Numeric helpers.
///
/// This module provides the floating-point rules shared by the evaluator and
/// the value model: tolerant equality, the exponentiation rules (including the
/// real cube root of negative numbers), the Gamma function behind factorial,
/// and a checked conversion from `f64` to an integer exponent.
pub mod num;
