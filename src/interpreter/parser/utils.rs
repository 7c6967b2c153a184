use crate::interpreter::lexer::Token;

/// The keyword that introduces a variable declaration.
pub const DECLARATION_KEYWORD: &str = "let";

/// Identifiers that can never name a variable.
pub const RESERVED_KEYWORDS: &[&str] = &[DECLARATION_KEYWORD];

/// How many recursive productions one statement may have open at once.
///
/// Every parenthesis, unary sign, postfix `!`, right-hand `^` and chained
/// binary operator opens one level.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Operators that do not turn a following `+` or `-` into a unary sign.
///
/// `(4)+2` and `3!-1` are binary operations even though the operator is
/// preceded by another operator token.
const TRANSPARENT_OPERATORS: [char; 3] = ['(', ')', '!'];

/// Returns `true` if `name` is a reserved keyword.
///
/// # Example
/// ```
/// use unitcalc::interpreter::parser::utils::is_keyword;
///
/// assert!(is_keyword("let"));
/// assert!(!is_keyword("meter"));
/// ```
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Finds the rightmost binary operator from `targets` in `tokens`.
///
/// The scan runs from the end of the slice towards the start and ignores:
/// - anything nested inside parentheses,
/// - an operator whose previous token is itself an operator (other than
///   `(`, `)` and `!`), because that operator is a unary sign,
/// - the first token, which can only be a unary sign.
///
/// Splitting on the rightmost match is what makes `+ - * / %`
/// left-associative.
///
/// # Parameters
/// - `tokens`: The range to search.
/// - `targets`: Operator characters of one precedence level.
///
/// # Returns
/// The position and character of the operator found, or `None`.
///
/// # Example
/// ```
/// use unitcalc::interpreter::{lexer::tokenize, parser::utils::reverse_search};
///
/// let tokens = tokenize("4 * (3 + 2) - -5").unwrap();
/// assert_eq!(reverse_search(&tokens, &['+', '-']), Some((7, '-')));
/// ```
#[must_use]
pub fn reverse_search(tokens: &[Token], targets: &[char]) -> Option<(usize, char)> {
    let mut nesting: isize = 0;

    for position in (1..tokens.len()).rev() {
        match tokens[position].operator() {
            Some(')') => nesting += 1,
            Some('(') => nesting -= 1,
            _ => {},
        }
        if nesting != 0 {
            continue;
        }

        let unary = tokens[position - 1].operator()
                                        .is_some_and(|op| !TRANSPARENT_OPERATORS.contains(&op));
        if unary {
            continue;
        }

        if let Some(op) = tokens[position].operator()
           && targets.contains(&op)
        {
            return Some((position, op));
        }
    }

    None
}

/// Finds the leftmost `target` operator in `tokens` outside parentheses.
///
/// # Returns
/// The position of the operator, or `None` if it does not occur at the top
/// level.
///
/// # Example
/// ```
/// use unitcalc::interpreter::{lexer::tokenize, parser::utils::find_forward};
///
/// let tokens = tokenize("(2 ^ 3) ^ 2").unwrap();
/// assert_eq!(find_forward(&tokens, '^'), Some(5));
/// ```
#[must_use]
pub fn find_forward(tokens: &[Token], target: char) -> Option<usize> {
    let mut nesting: isize = 0;

    for (position, token) in tokens.iter().enumerate() {
        match token.operator() {
            Some('(') => nesting += 1,
            Some(')') => nesting -= 1,
            _ => {},
        }
        if nesting == 0 && token.is_operator(target) {
            return Some(position);
        }
    }

    None
}
