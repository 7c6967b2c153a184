use thiserror::Error;

/// Represents all errors raised when tokens do not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The input contained no tokens at all.
    #[error("Empty expression.")]
    EmptyInput,
    /// A production was handed an empty token range, as in `()` or `2 ^`.
    #[error("Expected an expression.")]
    ExpectedExpression,
    /// A postfix operator was written without an operand, as in a bare `!`.
    #[error("Argument for '{0}' not provided.")]
    MissingOperand(char),
    /// A parenthesized primary was not closed, as in `(5`.
    #[error("Missing ')'.")]
    UnmatchedParenthesis,
    /// A number or identifier was followed by further tokens, as in `5 3`.
    #[error("Only a primary was expected, but found trailing tokens.")]
    TrailingTokens,
    /// A `let` statement was malformed.
    #[error("Invalid variable declaration syntax. Example: let x = 4.2")]
    InvalidDeclaration,
    /// The left-hand side of `=` was not a single identifier, or the
    /// right-hand side was missing.
    #[error("Not a valid assignment. Example: x = 4.2")]
    InvalidAssignment,
    /// A token that cannot start a primary.
    #[error("Unexpected token: {0}.")]
    UnexpectedToken(String),
    /// Parentheses, signs or operator chains went deeper than the evaluator
    /// allows.
    #[error("Expression is nested too deeply.")]
    NestingTooDeep,
}
