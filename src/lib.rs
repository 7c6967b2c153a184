//! # unitcalc
//!
//! unitcalc is a unit-aware expression calculator written in Rust.
//! It tokenizes a line of text and evaluates it in a single recursive-descent
//! pass, with variables, factorials, right-associative powers and values that
//! carry compound physical units such as `meter/second^2`.
//!
//! ```
//! use std::rc::Rc;
//!
//! use unitcalc::{Parser, builtin_unit_system};
//!
//! let mut parser = Parser::new(Rc::new(builtin_unit_system()));
//! assert_eq!(parser.evaluate("2 ^ 3 ^ 2").unwrap().value(), 512.0);
//!
//! let length = parser.evaluate("1 * kilometer + 500 * meter").unwrap();
//! assert_eq!(length.to_string(), "1500 meter");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// The built-in unit table.
///
/// Lists the length, mass, time and temperature units the command-line shell
/// registers at startup, and builds a `UnitSystem` from them.
pub mod builtin;
/// Provides unified error types for tokenizing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// matching the grammar, evaluating, or doing unit arithmetic.
///
/// # Responsibilities
/// - Defines one error enum per failure kind.
/// - Wraps them in a single `Error` returned by `Parser::evaluate`.
/// - Supports integration with standard error handling traits through
///   `thiserror`.
pub mod error;
/// Orchestrates the evaluation of calculator statements.
///
/// This module ties together the lexer, the fused parser/evaluator and the
/// unit-aware value model.
///
/// # Responsibilities
/// - Coordinates tokenizing and evaluation.
/// - Provides the `Parser` entry point and the variable table.
/// - Defines `Primary`, `UnitSystem` and unit arithmetic.
pub mod interpreter;
/// General numeric helpers.
///
/// This module provides floating-point routines used by both the evaluator
/// and the value model, such as the exponentiation rules and the Gamma
/// function.
pub mod util;

pub use crate::{
    builtin::{builtin_unit_system, builtin_units},
    error::Error,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{Parser, Variables, core::EvalResult},
        value::{
            primary::Primary,
            unit_system::{Dimension, UnitInformation, UnitSystem},
        },
    },
};
