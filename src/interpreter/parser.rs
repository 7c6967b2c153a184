use std::{collections::HashMap, rc::Rc};

use crate::{
    error::SyntaxError,
    interpreter::{
        lexer::tokenize,
        parser::core::{Context, EvalResult},
        value::{primary::Primary, unit_system::UnitSystem},
    },
};

/// Evaluation context, statements, declarations and assignments.
///
/// Holds the state threaded through every production and the two
/// lowest-precedence rules of the grammar.
pub mod core;

/// Unary and primary productions.
///
/// Handles factorial, parenthesized groups, number literals and identifier
/// lookup.
pub mod unary;

/// Binary operator productions.
///
/// Splits token ranges on `+ -`, `* / %` and `^` and combines the values of
/// both sides.
pub mod binary;

/// Operator scans and the reserved keyword set.
pub mod utils;

/// The variable table: a flat namespace from names to values.
pub type Variables = HashMap<String, Primary>;

/// Evaluates calculator statements against a variable table and a unit
/// system.
///
/// Each call to [`Parser::evaluate`] tokenizes one line and reduces it
/// straight to a value. Declarations and assignments update the parser's own
/// variable table; [`Parser::evaluate_with`] runs against a table owned by the
/// caller instead, so several parsers can share variables.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use unitcalc::{Parser, builtin::builtin_unit_system};
///
/// let mut parser = Parser::new(Rc::new(builtin_unit_system()));
/// parser.evaluate("let speed = 3 * meter / second").unwrap();
///
/// let distance = parser.evaluate("speed * 10 * second").unwrap();
/// assert_eq!(distance.value(), 30.0);
/// assert_eq!(distance.to_string(), "30 meter");
///
/// assert!(parser.evaluate("speed + 1 * kilogram").unwrap_err().is_unit());
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    variables: Variables,
    units:     Rc<UnitSystem>,
}

impl Parser {
    /// Creates a parser with an empty variable table over the given units.
    #[must_use]
    pub fn new(units: Rc<UnitSystem>) -> Self {
        Self { variables: Variables::new(),
               units }
    }

    /// Evaluates one statement using the parser's own variable table.
    ///
    /// # Errors
    /// - Token errors if the text cannot be tokenized.
    /// - Syntax errors for empty or malformed input.
    /// - Runtime errors for undefined or redeclared variables, division by
    ///   zero and uncomputable powers or factorials.
    /// - Unit errors from unit-aware arithmetic.
    ///
    /// On error the variable table is left exactly as it was.
    ///
    /// # Example
    /// ```
    /// use unitcalc::Parser;
    ///
    /// let mut parser = Parser::default();
    /// assert_eq!(parser.evaluate("5 - 3 * 2").unwrap().value(), -1.0);
    /// assert!(parser.evaluate("42 / 0").unwrap_err().is_runtime());
    /// assert!(parser.evaluate("(5").unwrap_err().is_syntax());
    /// ```
    pub fn evaluate(&mut self, text: &str) -> EvalResult<Primary> {
        run(text, &mut self.variables, &self.units)
    }

    /// Evaluates one statement against an externally owned variable table.
    ///
    /// The parser's own table is neither read nor written.
    ///
    /// # Errors
    /// The same as [`Parser::evaluate`].
    ///
    /// # Example
    /// ```
    /// use unitcalc::{Parser, Variables};
    ///
    /// let mut shared = Variables::new();
    /// Parser::default().evaluate_with("let x = 4.2", &mut shared).unwrap();
    ///
    /// let other = Parser::default();
    /// assert_eq!(other.evaluate_with("x * 2", &mut shared).unwrap().value(), 8.4);
    /// ```
    pub fn evaluate_with(&self, text: &str, variables: &mut Variables) -> EvalResult<Primary> {
        run(text, variables, &self.units)
    }

    /// Returns the parser's own variable table.
    #[must_use]
    pub const fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Returns the unit system identifiers are resolved against.
    #[must_use]
    pub const fn unit_system(&self) -> &Rc<UnitSystem> {
        &self.units
    }
}

fn run(text: &str, variables: &mut Variables, units: &Rc<UnitSystem>) -> EvalResult<Primary> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(SyntaxError::EmptyInput.into());
    }

    tracing::debug!(tokens = tokens.len(), "evaluating statement");
    Context::new(variables, units).statement(&tokens)
}
