use std::rc::Rc;

use crate::{
    error::{Error, RuntimeError, SyntaxError},
    interpreter::{
        lexer::Token,
        parser::{
            Variables,
            utils::{DECLARATION_KEYWORD, MAX_NESTING_DEPTH, find_forward, is_keyword},
        },
        value::{primary::Primary, unit_system::UnitSystem},
    },
};

/// Result type used by the evaluator.
///
/// Every production returns either a value of type `T` or the [`Error`]
/// describing why the token range could not be evaluated.
pub type EvalResult<T> = Result<T, Error>;

/// Stores the state threaded through one evaluation.
///
/// A `Context` borrows the variable table mutably and the unit system
/// immutably for the duration of a single statement. Every grammar production
/// is a method on `Context` that takes the token slice it covers.
pub struct Context<'a> {
    /// Variables visible to the statement; written by declarations and
    /// assignments.
    pub variables: &'a mut Variables,
    /// Unit system that identifiers fall back to when no variable matches.
    pub units:     &'a Rc<UnitSystem>,
    depth:         usize,
}

impl<'a> Context<'a> {
    /// Creates a context over a variable table and a unit system.
    pub const fn new(variables: &'a mut Variables, units: &'a Rc<UnitSystem>) -> Self {
        Self { variables,
               units,
               depth: 0 }
    }

    /// Runs `production` one nesting level deeper.
    ///
    /// # Errors
    /// - [`SyntaxError::NestingTooDeep`] once [`MAX_NESTING_DEPTH`] levels are
    ///   already open.
    /// - Whatever `production` returns.
    pub(super) fn nested<T>(&mut self,
                            production: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::NestingTooDeep.into());
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Evaluates a whole statement.
    ///
    /// A statement that starts with `let` is a declaration; anything else is
    /// an assignment chain or a plain expression.
    ///
    /// Grammar: `statement := declaration | assignment`
    ///
    /// # Parameters
    /// - `tokens`: Every token of the input line.
    ///
    /// # Returns
    /// The value of the statement. Declarations and assignments return the
    /// value they stored.
    pub fn statement(&mut self, tokens: &[Token]) -> EvalResult<Primary> {
        match tokens.first().and_then(Token::identifier) {
            Some(DECLARATION_KEYWORD) => self.declaration(tokens),
            _ => self.assignment(tokens),
        }
    }

    /// Evaluates a variable declaration.
    ///
    /// Grammar: `declaration := "let" identifier "=" expression`
    ///
    /// The name must not be a reserved keyword and must not already exist.
    /// Redeclaration is detected before the initializer is evaluated, and the
    /// table is written only once the initializer succeeds.
    ///
    /// # Errors
    /// - [`SyntaxError::InvalidDeclaration`] if any piece is missing or the
    ///   name is reserved.
    /// - [`RuntimeError::Redeclaration`] if the name is already declared.
    /// - Any error raised while evaluating the initializer.
    pub fn declaration(&mut self, tokens: &[Token]) -> EvalResult<Primary> {
        let [_, name, equals, initializer @ ..] = tokens else {
            return Err(SyntaxError::InvalidDeclaration.into());
        };
        let Some(name) = name.identifier() else {
            return Err(SyntaxError::InvalidDeclaration.into());
        };
        if is_keyword(name) || !equals.is_operator('=') || initializer.is_empty() {
            return Err(SyntaxError::InvalidDeclaration.into());
        }

        if self.variables.contains_key(name) {
            return Err(RuntimeError::Redeclaration(name.to_string()).into());
        }

        let value = self.expression(initializer)?;
        tracing::debug!(variable = name, value = %value, "declared variable");
        self.variables.insert(name.to_string(), value.clone());

        Ok(value)
    }

    /// Evaluates a right-associative assignment chain.
    ///
    /// Grammar: `assignment := identifier "=" assignment | expression`
    ///
    /// The first `=` outside parentheses splits the range. Without one, the
    /// whole range is an expression. Assignment never declares: the target
    /// must already exist, which is checked before the right-hand side runs.
    ///
    /// # Errors
    /// - [`SyntaxError::InvalidAssignment`] if the left-hand side is not a
    ///   single identifier or the right-hand side is empty.
    /// - [`RuntimeError::UnknownVariable`] if the target was never declared.
    /// - Any error raised while evaluating the right-hand side.
    pub fn assignment(&mut self, tokens: &[Token]) -> EvalResult<Primary> {
        let Some(position) = find_forward(tokens, '=') else {
            return self.expression(tokens);
        };

        let (target, rest) = tokens.split_at(position);
        let rhs = &rest[1..];
        let name = match target {
            [token] if !rhs.is_empty() => token.identifier(),
            _ => None,
        };
        let Some(name) = name else {
            return Err(SyntaxError::InvalidAssignment.into());
        };

        if !self.variables.contains_key(name) {
            return Err(RuntimeError::UnknownVariable(name.to_string()).into());
        }

        let value = self.nested(|context| context.assignment(rhs))?;
        tracing::debug!(variable = name, value = %value, "assigned variable");
        self.variables.insert(name.to_string(), value.clone());

        Ok(value)
    }
}
