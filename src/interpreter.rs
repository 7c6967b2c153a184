/// The lexer module tokenizes calculator statements for further parsing.
///
/// The lexer reads the raw source text and produces a flat list of tokens:
/// operators, numbers and identifiers. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens.
/// - Parses numeric literals, including fractions and exponents.
/// - Reports lexical errors with the offending position.
pub mod lexer;
/// The parser module evaluates token sequences directly.
///
/// There is no syntax tree. Each grammar production receives the slice of
/// tokens it covers, locates its split point, recurses on the sub-slices and
/// combines their values on the way back up. Variable bindings are updated as
/// declarations and assignments complete.
///
/// # Responsibilities
/// - Validates the grammar, reporting syntax errors.
/// - Applies operator precedence and associativity.
/// - Manages variable declaration, lookup and assignment.
/// - Reports runtime errors such as division by zero.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Every expression evaluates to a `Primary`: a floating-point value tagged
/// with an optional compound unit drawn from a `UnitSystem`.
pub mod value;
