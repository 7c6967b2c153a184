use std::fmt;

use logos::Logos;

use crate::error::TokenError;

/// Represents a lexical token in a calculator statement.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Signs are never folded into numbers: `-5` is the operator `-` followed by
/// the number `5`, and the parser decides whether the sign is unary or binary.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// One of `+ - * / % ^ ! = ( )`.
    #[regex(r"[-+*/%^!=()]", |lex| lex.slice().chars().next())]
    Operator(char),
    /// Numeric literal tokens, such as `42`, `.5`, `4.`, `2.1e-10` or `1E+3`.
    ///
    /// The pattern is deliberately wider than a valid literal so that the
    /// longest numeric-looking lexeme is consumed in one piece; a lexeme that
    /// does not parse (`42e`, `.`) is reported as a bad number instead of
    /// being split.
    #[regex(r"([0-9]+\.?[0-9]*|\.[0-9]*)([eE][+-]?[0-9]*)?", parse_number)]
    Number(f64),
    /// Identifier tokens; variable or unit names such as `x` or `meter`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
}

/// Error produced by the scanner before it is enriched with position
/// information by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    /// No token starts with the current character.
    #[default]
    UnknownToken,
    /// A numeric lexeme could not be parsed as a float.
    BadNumber,
}

impl Token {
    /// Returns the operator character if this token is an operator.
    #[must_use]
    pub const fn operator(&self) -> Option<char> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }

    /// Returns `true` if this token is exactly the operator `op`.
    ///
    /// # Example
    /// ```
    /// use unitcalc::interpreter::lexer::Token;
    ///
    /// assert!(Token::Operator('(').is_operator('('));
    /// assert!(!Token::Number(1.0).is_operator('('));
    /// ```
    #[must_use]
    pub fn is_operator(&self, op: char) -> bool {
        self.operator() == Some(op)
    }

    /// Returns the identifier name if this token is an identifier.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(op) => write!(f, "{op}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
        }
    }
}

/// Parses a floating-point literal from the current token slice.
///
/// # Returns
/// - `Ok(f64)`: The parsed value.
/// - `Err(LexError::BadNumber)`: If the slice is not a complete literal.
fn parse_number(lex: &logos::Lexer<Token>) -> Result<f64, LexError> {
    lex.slice().parse().map_err(|_| LexError::BadNumber)
}

/// Converts a source line into its sequence of tokens.
///
/// Whitespace separates tokens and is otherwise ignored. A numeric prefix
/// followed by identifier characters yields two tokens, so `42e2xyz` becomes
/// `Number(4200)` then `Identifier("xyz")`.
///
/// # Errors
/// - [`TokenError::UnknownToken`] for any character that cannot start a token.
/// - [`TokenError::BadNumber`] for a numeric lexeme that is not a complete
///   literal, such as `42e`.
///
/// # Example
/// ```
/// use unitcalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 * (x + 1e3)").unwrap();
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[0], Token::Number(2.0));
/// assert_eq!(tokens[3], Token::Identifier("x".to_string()));
/// assert_eq!(tokens[5], Token::Number(1000.0));
///
/// assert!(tokenize("42e").is_err());
/// assert!(tokenize("4 $ 2").is_err());
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, TokenError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push(tok),
            Err(LexError::BadNumber) => {
                return Err(TokenError::BadNumber { lexeme: lexer.slice().to_string(),
                                                   position });
            },
            Err(LexError::UnknownToken) => {
                let token = text.get(position..)
                                .and_then(|rest| rest.chars().next())
                                .unwrap_or_default();
                return Err(TokenError::UnknownToken { token, position });
            },
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized input");
    Ok(tokens)
}
