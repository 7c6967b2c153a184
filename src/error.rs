/// Tokenizer errors.
///
/// Raised while turning raw text into tokens, before any grammar production
/// runs: characters that cannot start a token and numeric lexemes that are not
/// complete floating-point literals.
pub mod token_error;
/// Syntax errors.
///
/// Defines the errors raised when a token range does not match any production
/// of the grammar. These are always detected before the variable table is
/// touched.
pub mod syntax_error;
/// Runtime errors.
///
/// Contains the errors raised when the grammar matched but evaluation is
/// semantically invalid, such as undefined variables, division by zero or an
/// uncomputable power.
pub mod runtime_error;
/// Unit errors.
///
/// Errors raised by the unit system and by unit-aware arithmetic on
/// [`Primary`](crate::interpreter::value::primary::Primary) values.
pub mod unit_error;

use thiserror::Error;

pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;
pub use token_error::TokenError;
pub use unit_error::UnitError;

/// Every failure an evaluation can surface to the caller.
///
/// The four kinds are disjoint. An error always aborts the whole `evaluate`
/// call; nothing is partially committed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input could not be tokenized.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The tokens do not form a valid statement.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The statement is well formed but cannot be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// The unit layer rejected an operation.
    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl Error {
    /// Returns `true` for tokenizer errors.
    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// Returns `true` for syntax errors.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// Returns `true` for runtime errors.
    #[must_use]
    pub const fn is_runtime(&self) -> bool {
        matches!(self, Self::Runtime(_))
    }

    /// Returns `true` for errors raised by the unit layer.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit(_))
    }
}
