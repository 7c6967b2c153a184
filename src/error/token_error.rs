use thiserror::Error;

/// Represents all errors that can occur while tokenizing a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// A character that is not an operator, a digit, `.`, whitespace or an
    /// identifier character.
    #[error("Unknown token '{token}' at position {position}.")]
    UnknownToken {
        /// The offending character.
        token:    char,
        /// Byte offset of the character in the input.
        position: usize,
    },
    /// A numeric lexeme that is not a complete floating-point literal, such as
    /// the dangling exponent in `42e`.
    #[error("Malformed number '{lexeme}' at position {position}.")]
    BadNumber {
        /// The text that was consumed as a number.
        lexeme:   String,
        /// Byte offset where the lexeme starts.
        position: usize,
    },
}
