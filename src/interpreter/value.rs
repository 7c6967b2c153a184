/// Numeric values with optional compound units.
///
/// Defines the `Primary` type produced by every successful evaluation,
/// together with its arithmetic. Operations convert between units of the same
/// dimension, combine units on multiplication and division, and reject
/// mismatched dimensions on addition and subtraction.
pub mod primary;
/// Per-side unit bookkeeping.
///
/// A `UnitBag` records which unit represents each dimension on one side of a
/// fraction bar and how many times it is repeated.
pub mod unit_bag;
/// The registry of named units.
///
/// Defines `UnitSystem`, `UnitInformation` and `Dimension`, and converts
/// values between units of the same dimension through an affine map.
///
/// # Responsibilities
/// - Registers units and rejects duplicate names.
/// - Resolves unit names to their dimension.
/// - Gives every system an identity so values from unrelated systems never
///   mix.
pub mod unit_system;
