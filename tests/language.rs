use std::{fs, rc::Rc};

use unitcalc::{
    Error, EvalResult, Parser, Primary, Variables, builtin_unit_system,
    error::{RuntimeError, SyntaxError},
};
use walkdir::WalkDir;

/// Runs every `tests/scripts/*.calc` file as one parser session.
///
/// Each non-blank, non-comment line has the form `statement => expected`.
/// `expected` is a number, the displayed form of a value with units, or
/// `! <kind>` where kind is `token`, `syntax`, `runtime` or `unit`.
#[test]
fn script_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let mut parser = unit_parser();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (statement, expected) =
                line.split_once(" => ")
                    .unwrap_or_else(|| panic!("{path:?}:{}: missing ' => '", i + 1));

            count += 1;
            check_line(&parser.evaluate(statement), expected)
                .unwrap_or_else(|message| panic!("{path:?}:{}: `{statement}`: {message}", i + 1));
        }
    }

    assert!(count > 0, "No script lines found in tests/scripts");
}

fn check_line(result: &EvalResult<Primary>, expected: &str) -> Result<(), String> {
    if let Some(kind) = expected.strip_prefix("! ") {
        return match result {
            Err(e) if error_kind(e) == kind => Ok(()),
            Err(e) => Err(format!("expected a {kind} error, got {e:?}")),
            Ok(value) => Err(format!("expected a {kind} error, got {value}")),
        };
    }

    let value = result.as_ref().map_err(|e| format!("failed: {e}"))?;
    match expected.parse::<f64>() {
        Ok(number) if approx_eq(value.value(), number) && value.is_dimensionless() => Ok(()),
        Err(_) if value.to_string() == expected => Ok(()),
        _ => Err(format!("expected {expected}, got {value}")),
    }
}

const fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::Token(_) => "token",
        Error::Syntax(_) => "syntax",
        Error::Runtime(_) => "runtime",
        Error::Unit(_) => "unit",
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn unit_parser() -> Parser {
    Parser::new(Rc::new(builtin_unit_system()))
}

fn eval(src: &str) -> EvalResult<Primary> {
    Parser::default().evaluate(src)
}

fn assert_value(src: &str, expected: f64) {
    match eval(src) {
        Ok(value) => assert!(approx_eq(value.value(), expected),
                             "`{src}` evaluated to {value}, expected {expected}"),
        Err(e) => panic!("`{src}` failed: {e}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match eval(src) {
        Ok(value) => panic!("`{src}` succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn operator_precedence() {
    assert_value("5-3*2", -1.0);
    assert_value("2^5^2", 2f64.powf(25.0));
    assert_value("-2^3", -8.0);
    assert_value("1 + 2 * 3 ^ 2", 19.0);
    assert_value("(1 + 2) * 3", 9.0);
}

#[test]
fn associativity() {
    assert_value("64 / 4 / 2", 8.0);
    assert_value("17 % 10 % 4", 3.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("2 ^ 2 ^ 3", 256.0);
}

#[test]
fn literal_round_trip_with_signs() {
    for literal in ["0", "42", "3.25", ".5", "7.", "1e5", "2.5e-3", "6E+2"] {
        let expected: f64 = literal.parse().unwrap();
        assert_value(literal, expected);
        assert_value(&format!("-{literal}"), -expected);
        assert_value(&format!("+{literal}"), expected);
    }
}

#[test]
fn division_and_modulo_by_zero_are_runtime_errors() {
    assert_eq!(assert_failure("42/0"), Error::Runtime(RuntimeError::DivisionByZero));
    assert_eq!(assert_failure("42%0"), Error::Runtime(RuntimeError::DivisionByZero));
}

#[test]
fn parenthesis_mismatch_is_syntax_error() {
    assert_eq!(assert_failure("(5"), Error::Syntax(SyntaxError::UnmatchedParenthesis));
    assert!(assert_failure("5)").is_syntax());
    assert!(assert_failure("((5)").is_syntax());
}

#[test]
fn deep_nesting_is_syntax_error() {
    let signs = format!("{}1", "-".repeat(10_000));
    assert_eq!(assert_failure(&signs), Error::Syntax(SyntaxError::NestingTooDeep));

    let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(assert_failure(&parens), Error::Syntax(SyntaxError::NestingTooDeep));

    let factorials = format!("1{}", "!".repeat(10_000));
    assert_eq!(assert_failure(&factorials), Error::Syntax(SyntaxError::NestingTooDeep));

    let sum = format!("{}1", "1+".repeat(10_000));
    assert_eq!(assert_failure(&sum), Error::Syntax(SyntaxError::NestingTooDeep));

    assert_value(&format!("{}7", "-".repeat(100)), 7.0);
    assert_value(&format!("{}2{}", "(".repeat(100), ")".repeat(100)), 2.0);
    assert_value(&format!("{}1", "1+".repeat(100)), 101.0);
}

#[test]
fn empty_input_is_syntax_error() {
    assert_eq!(assert_failure(""), Error::Syntax(SyntaxError::EmptyInput));
    assert_eq!(assert_failure("   \t"), Error::Syntax(SyntaxError::EmptyInput));
    assert_eq!(assert_failure("()"), Error::Syntax(SyntaxError::ExpectedExpression));
    assert_eq!(assert_failure("12+"), Error::Syntax(SyntaxError::ExpectedExpression));
}

#[test]
fn malformed_numbers_are_rejected() {
    assert!(assert_failure("4.2.3").is_syntax());
    assert!(assert_failure("1e5.2").is_syntax());
    assert!(assert_failure("42e").is_token());
}

#[test]
fn factorial_matches_gamma() {
    let twenty = eval("20!").unwrap().value();
    let gamma = unitcalc::util::num::gamma(21.0);
    assert!((twenty - gamma).abs() / gamma < 1e-12);

    assert_eq!(eval("1000000!").unwrap().value(), f64::INFINITY);
    assert_eq!(eval("999.5!").unwrap().value(), f64::INFINITY);

    assert_eq!(assert_failure("(-1)!"), Error::Runtime(RuntimeError::NegativeFactorial(-1.0)));
    assert_eq!(assert_failure("!"), Error::Syntax(SyntaxError::MissingOperand('!')));
}

#[test]
fn variable_lifecycle() {
    let mut parser = Parser::default();

    assert_eq!(parser.evaluate("let x = 4.2").unwrap().value(), 4.2);
    assert_eq!(parser.evaluate("x").unwrap().value(), 4.2);
    assert_eq!(parser.evaluate("let x = 1").unwrap_err(),
               Error::Runtime(RuntimeError::Redeclaration("x".to_string())));

    parser.evaluate("let y = 0").unwrap();
    parser.evaluate("let z = 0").unwrap();
    assert_eq!(parser.evaluate("x = y = z = 42").unwrap().value(), 42.0);
    for name in ["x", "y", "z"] {
        assert_eq!(parser.variables()[name].value(), 42.0);
    }
}

#[test]
fn assignment_never_declares() {
    let mut parser = Parser::default();
    assert_eq!(parser.evaluate("w = 3").unwrap_err(),
               Error::Runtime(RuntimeError::UnknownVariable("w".to_string())));
    assert!(parser.variables().is_empty());
}

#[test]
fn failed_statements_leave_variables_untouched() {
    let mut parser = Parser::default();
    parser.evaluate("let x = 1").unwrap();

    assert!(parser.evaluate("x = 1 / 0").is_err());
    assert!(parser.evaluate("let y = 2 +").is_err());
    assert!(parser.evaluate("let z = undefined").is_err());

    assert_eq!(parser.variables().len(), 1);
    assert_eq!(parser.variables()["x"].value(), 1.0);
}

#[test]
fn redeclaration_is_checked_before_initializer() {
    let mut parser = Parser::default();
    parser.evaluate("let x = 1").unwrap();

    assert_eq!(parser.evaluate("let x = 1 / 0").unwrap_err(),
               Error::Runtime(RuntimeError::Redeclaration("x".to_string())));
}

#[test]
fn let_is_reserved() {
    assert_eq!(assert_failure("let let = 3"), Error::Syntax(SyntaxError::InvalidDeclaration));
    assert_eq!(assert_failure("let = 3"), Error::Syntax(SyntaxError::InvalidDeclaration));
}

#[test]
fn external_variable_table_is_shared() {
    let mut shared = Variables::new();
    let first = Parser::default();
    let second = Parser::default();

    first.evaluate_with("let rate = 3", &mut shared).unwrap();
    assert_eq!(second.evaluate_with("rate * 2", &mut shared).unwrap().value(), 6.0);
    assert!(shared.contains_key("rate"));
}

#[test]
fn parser_table_is_separate_from_external_table() {
    let mut parser = Parser::default();
    let mut external = Variables::new();

    parser.evaluate_with("let a = 1", &mut external).unwrap();
    assert!(parser.variables().is_empty());
    assert!(parser.evaluate("a").unwrap_err().is_runtime());
}

#[test]
fn variables_shadow_unit_names() {
    let mut parser = unit_parser();
    parser.evaluate("let meter = 2").unwrap();

    let value = parser.evaluate("meter * 3").unwrap();
    assert_eq!(value.value(), 6.0);
    assert!(value.is_dimensionless());
}

#[test]
fn unit_expressions() {
    let mut parser = unit_parser();

    let speed = parser.evaluate("(meter / second) * second").unwrap();
    assert_eq!(speed.to_string(), "1 meter");

    assert!(parser.evaluate("meter + kilogram").unwrap_err().is_unit());

    let sum = parser.evaluate("meter + foot").unwrap();
    assert_eq!(sum.unit_string(), "foot");
    assert!(approx_eq(sum.value(), 1.0 / 0.3048 + 1.0));
}

#[test]
fn units_require_a_unit_system() {
    assert_eq!(assert_failure("3 * meter"),
               Error::Runtime(RuntimeError::UnknownVariable("meter".to_string())));
}
