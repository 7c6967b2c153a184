use crate::{
    error::{RuntimeError, SyntaxError},
    interpreter::{
        lexer::Token,
        parser::core::{Context, EvalResult},
        value::primary::Primary,
    },
};

impl Context<'_> {
    /// Evaluates a primary.
    ///
    /// The rule is: `primary := primary "!" | "(" assignment ")" | number |
    /// identifier`
    ///
    /// Forms are tried in order: a trailing `!` takes the factorial of
    /// everything before it, a number or identifier must fill the whole range,
    /// and a range opening with `(` must close with `)`. The parenthesized
    /// range is an assignment, so `5 + (x = 1)` is allowed.
    ///
    /// # Errors
    /// - [`SyntaxError::ExpectedExpression`] for an empty range, as in `()`.
    /// - [`SyntaxError::MissingOperand`] for a bare `!`.
    /// - [`SyntaxError::TrailingTokens`] if a literal is followed by more
    ///   tokens, as in `5 3`.
    /// - [`SyntaxError::UnmatchedParenthesis`] for `(5`.
    /// - [`SyntaxError::UnexpectedToken`] for any other leading token.
    /// - [`SyntaxError::NestingTooDeep`] past the parenthesis nesting limit.
    /// - [`RuntimeError::UnknownVariable`] for an unresolved identifier.
    pub fn primary(&mut self, tokens: &[Token]) -> EvalResult<Primary> {
        let Some((first, last)) = tokens.first().zip(tokens.last()) else {
            return Err(SyntaxError::ExpectedExpression.into());
        };

        if last.is_operator('!') {
            return self.factorial(&tokens[..tokens.len() - 1]);
        }

        match first {
            Token::Number(_) | Token::Identifier(_) if tokens.len() > 1 => {
                Err(SyntaxError::TrailingTokens.into())
            },
            Token::Number(value) => Ok(Primary::new(*value)),
            Token::Identifier(name) => self.identifier(name),
            Token::Operator('(') => {
                if tokens.len() < 2 || !last.is_operator(')') {
                    return Err(SyntaxError::UnmatchedParenthesis.into());
                }
                self.nested(|context| context.assignment(&tokens[1..tokens.len() - 1]))
            },
            Token::Operator(_) => Err(SyntaxError::UnexpectedToken(first.to_string()).into()),
        }
    }

    /// Evaluates `operand!` as `Γ(operand + 1)`.
    fn factorial(&mut self, operand: &[Token]) -> EvalResult<Primary> {
        if operand.is_empty() {
            return Err(SyntaxError::MissingOperand('!').into());
        }
        tracing::trace!(production = "primary", op = "!", "factorial");

        self.nested(|context| context.primary(operand))?.factorial()
    }

    /// Resolves an identifier, first as a variable and then as a unit name.
    ///
    /// A unit name evaluates to one of that unit.
    fn identifier(&self, name: &str) -> EvalResult<Primary> {
        if let Some(value) = self.variables.get(name) {
            return Ok(value.clone());
        }
        if self.units.contains(name) {
            return Ok(Primary::with_unit(1.0, self.units, name)?);
        }

        Err(RuntimeError::UnknownVariable(name.to_string()).into())
    }
}
