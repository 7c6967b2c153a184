use crate::{
    error::{RuntimeError, SyntaxError},
    interpreter::{
        lexer::Token,
        parser::{
            core::{Context, EvalResult},
            utils::{find_forward, reverse_search},
        },
        value::primary::Primary,
    },
};

impl Context<'_> {
    /// Evaluates addition and subtraction.
    ///
    /// Handles left-associative binary operators: `+` and `-`.
    ///
    /// The rule is: `expression := expression ("+" | "-") term | term`
    ///
    /// The rightmost top-level `+` or `-` that is not a unary sign splits the
    /// range; the left part is another expression and the right part a term.
    ///
    /// # Parameters
    /// - `tokens`: The range covered by this production.
    ///
    /// # Returns
    /// The sum or difference, in the right operand's units.
    pub fn expression(&mut self, tokens: &[Token]) -> EvalResult<Primary> {
        let Some((position, op)) = reverse_search(tokens, &['+', '-']) else {
            return self.term(tokens);
        };
        tracing::trace!(production = "expression", %op, position, "split");

        let lhs = self.nested(|context| context.expression(&tokens[..position]))?;
        let rhs = self.term(&tokens[position + 1..])?;

        let result = match op {
            '+' => lhs.add(&rhs)?,
            _ => lhs.subtract(&rhs)?,
        };
        Ok(result)
    }

    /// Evaluates multiplication, division and remainder.
    ///
    /// Handles left-associative operators: `*`, `/` and `%`.
    ///
    /// The rule is: `term := term ("*" | "/" | "%") exponent | exponent`
    ///
    /// The divisor of `/` and `%` is evaluated first and rejected if it is
    /// zero, before the dividend is evaluated.
    ///
    /// # Errors
    /// - [`RuntimeError::DivisionByZero`] if a divisor is zero.
    /// - Unit errors from the underlying arithmetic.
    pub fn term(&mut self, tokens: &[Token]) -> EvalResult<Primary> {
        let Some((position, op)) = reverse_search(tokens, &['*', '/', '%']) else {
            return self.exponent(tokens);
        };
        tracing::trace!(production = "term", %op, position, "split");

        if op == '*' {
            let lhs = self.nested(|context| context.term(&tokens[..position]))?;
            let rhs = self.exponent(&tokens[position + 1..])?;
            return Ok(lhs.multiply(&rhs)?);
        }

        let divisor = self.exponent(&tokens[position + 1..])?;
        if divisor.value() == 0.0 {
            return Err(RuntimeError::DivisionByZero.into());
        }

        let dividend = self.nested(|context| context.term(&tokens[..position]))?;
        let result = if op == '/' {
            dividend.divide(&divisor)?
        } else {
            dividend.remainder(&divisor)?
        };
        Ok(result)
    }

    /// Evaluates exponentiation and unary signs.
    ///
    /// The rule is: `exponent := ("-" | "+") exponent | primary "^" exponent
    /// | primary`
    ///
    /// A leading sign applies to the whole remaining chain, so `-2^2` is
    /// `-(2^2)`. The first top-level `^` separates the base from an exponent
    /// that recurses back into this production, which makes `2^3^2` equal to
    /// `2^(3^2)`.
    ///
    /// # Errors
    /// - [`SyntaxError::ExpectedExpression`] for an empty range, as in `2 ^`.
    /// - [`SyntaxError::NestingTooDeep`] for an excessively long sign run.
    /// - Runtime errors for powers without a real result.
    pub fn exponent(&mut self, tokens: &[Token]) -> EvalResult<Primary> {
        let Some(first) = tokens.first() else {
            return Err(SyntaxError::ExpectedExpression.into());
        };

        if let Some(sign @ ('-' | '+')) = first.operator() {
            let operand = self.nested(|context| context.exponent(&tokens[1..]))?;
            return Ok(if sign == '-' { operand.negate() } else { operand.identity() });
        }

        let Some(position) = find_forward(tokens, '^') else {
            return self.primary(tokens);
        };
        tracing::trace!(production = "exponent", position, "split");

        let base = self.primary(&tokens[..position])?;
        let exponent = self.nested(|context| context.exponent(&tokens[position + 1..]))?;

        base.power(&exponent)
    }
}
