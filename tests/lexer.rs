use unitcalc::{Token, error::TokenError, tokenize};

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

#[test]
fn operators_numbers_and_identifiers() {
    let tokens = tokenize("let speed_2 = (3.5 + x) * 1e+2 % 4 ^ 2! / .5 - y").unwrap();
    assert_eq!(tokens,
               vec![ident("let"),
                    ident("speed_2"),
                    Token::Operator('='),
                    Token::Operator('('),
                    Token::Number(3.5),
                    Token::Operator('+'),
                    ident("x"),
                    Token::Operator(')'),
                    Token::Operator('*'),
                    Token::Number(100.0),
                    Token::Operator('%'),
                    Token::Number(4.0),
                    Token::Operator('^'),
                    Token::Number(2.0),
                    Token::Operator('!'),
                    Token::Operator('/'),
                    Token::Number(0.5),
                    Token::Operator('-'),
                    ident("y")]);
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(tokenize(" \t1\r\n+\x0c2 ").unwrap(),
               vec![Token::Number(1.0), Token::Operator('+'), Token::Number(2.0)]);
    assert!(tokenize("   ").unwrap().is_empty());
    assert!(tokenize("").unwrap().is_empty());
}

#[test]
fn signs_are_separate_tokens() {
    assert_eq!(tokenize("x=-1").unwrap(),
               vec![ident("x"), Token::Operator('='), Token::Operator('-'), Token::Number(1.0)]);
}

#[test]
fn number_followed_by_identifier_splits() {
    assert_eq!(tokenize("42e2xyz").unwrap(), vec![Token::Number(4200.0), ident("xyz")]);
    assert_eq!(tokenize("3meter").unwrap(), vec![Token::Number(3.0), ident("meter")]);
}

#[test]
fn number_forms() {
    assert_eq!(tokenize("7.").unwrap(), vec![Token::Number(7.0)]);
    assert_eq!(tokenize(".25").unwrap(), vec![Token::Number(0.25)]);
    assert_eq!(tokenize("2.5E-3").unwrap(), vec![Token::Number(0.0025)]);
    assert_eq!(tokenize("4.2.3").unwrap(), vec![Token::Number(4.2), Token::Number(0.3)]);
}

#[test]
fn unknown_characters_report_position() {
    assert_eq!(tokenize("4 $ 2").unwrap_err(),
               TokenError::UnknownToken { token:    '$',
                                          position: 2, });
    assert_eq!(tokenize("1 + é").unwrap_err(),
               TokenError::UnknownToken { token:    'é',
                                          position: 4, });
}

#[test]
fn dangling_exponent_is_a_bad_number() {
    assert_eq!(tokenize("42e").unwrap_err(),
               TokenError::BadNumber { lexeme:   "42e".to_string(),
                                       position: 0, });
    assert_eq!(tokenize("1 + 3e-").unwrap_err(),
               TokenError::BadNumber { lexeme:   "3e-".to_string(),
                                       position: 4, });
    assert!(matches!(tokenize(".").unwrap_err(), TokenError::BadNumber { .. }));
}

#[test]
fn token_helpers() {
    let op = Token::Operator('^');
    assert_eq!(op.operator(), Some('^'));
    assert!(op.is_operator('^'));
    assert_eq!(op.identifier(), None);

    let name = ident("meter");
    assert_eq!(name.identifier(), Some("meter"));
    assert_eq!(name.operator(), None);
    assert_eq!(name.to_string(), "meter");
}
