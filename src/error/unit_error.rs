use thiserror::Error;

use crate::interpreter::value::unit_system::Dimension;

/// Represents all errors raised by the unit system and unit-aware arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// A unit with this name is already registered.
    #[error("{0} is already defined.")]
    UnitAlreadyExists(String),
    /// No unit with this name is registered.
    #[error("Unknown unit '{0}'.")]
    UnknownUnit(String),
    /// The operands cannot be combined with each other.
    #[error("Incompatible units: {reason}.")]
    IncompatibleUnits {
        /// What made the operands incompatible.
        reason: String,
    },
    /// Two different units of the same dimension on one side of a fraction.
    #[error("Different units for the same base {dimension}: '{first}' and '{second}'.")]
    DifferentUnitsForSameBase {
        /// The shared dimension.
        dimension: Dimension,
        /// The unit seen first.
        first:     String,
        /// The conflicting unit.
        second:    String,
    },
    /// A unit's repeat count no longer fits in a `u32`, as in
    /// `(meter^3)^2147483647`.
    #[error("Unit '{unit}' is repeated too many times.")]
    CountOverflow {
        /// The unit whose count overflowed.
        unit: String,
    },
    /// Division or remainder by a zero-valued operand.
    #[error("Division by zero.")]
    DivisionByZero,
}

impl UnitError {
    pub(crate) fn incompatible(reason: impl Into<String>) -> Self {
        Self::IncompatibleUnits { reason: reason.into() }
    }
}
