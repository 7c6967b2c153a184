use thiserror::Error;

/// Represents all errors that can occur during evaluation of a well-formed
/// statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Tried to read or assign a variable that was never declared.
    #[error("Unknown variable '{0}'.")]
    UnknownVariable(String),
    /// Tried to declare a variable that already exists.
    #[error("Redeclaration of variable '{0}'.")]
    Redeclaration(String),
    /// The divisor of `/` or `%` evaluated to zero.
    #[error("Division or mod by 0.")]
    DivisionByZero,
    /// A negative base raised to a non-integer exponent other than `1/3`.
    #[error("Can't compute fractional exponent of negative base.")]
    FractionalPowerOfNegative,
    /// Zero raised to a non-positive exponent.
    #[error("Undefined exponent.")]
    UndefinedPower,
    /// Factorial of a negative number.
    #[error("Factorial is only defined for non-negative numbers, but found {0}.")]
    NegativeFactorial(f64),
}
