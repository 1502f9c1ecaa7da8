//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, type keywords and identifiers
//! - Integer and string literals
//! - Operators and punctuation
//! - Illegal characters and end of input

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.go".to_string()))
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("func const var if else return true false");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Func,
            TokenKind::Const,
            TokenKind::Var,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::False,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_type_keywords() {
    let tokens = kinds("int string bool");

    assert_eq!(
        tokens,
        vec![TokenKind::IntType, TokenKind::StringType, TokenKind::BoolType, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore fmt.Println".to_string();
    let tokens = tokenize(source, Some("test.go".to_string()));

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "fmt.Println");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let source = "integer variable iffy".to_string();
    let tokens = tokenize(source, None);

    assert!(tokens[..3].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_integers() {
    let source = "42 0 100".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
}

#[test]
fn test_tokenize_strings_without_escapes() {
    let source = r#""hello" "two words" "back\slash""#.to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "two words");
    assert_eq!(tokens[2].value, "back\\slash");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("= := + - ! * / % == != < > <= >= && || ...");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Assignment,
            TokenKind::Declare,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Not,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Ellipsis,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_maximal_munch_without_spaces() {
    let tokens = kinds("a:=b==c!=d");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Identifier,
            TokenKind::Declare,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::NotEquals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = kinds("( ) { } [ ] , : ;");

    assert_eq!(
        tokens,
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_array_declaration() {
    let tokens = kinds("var arr = [...]int{1, 2}");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::OpenBracket,
            TokenKind::Ellipsis,
            TokenKind::CloseBracket,
            TokenKind::IntType,
            TokenKind::OpenCurly,
            TokenKind::Integer,
            TokenKind::Comma,
            TokenKind::Integer,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_illegal_character() {
    let source = "a @ b".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_unterminated_string_is_illegal() {
    let tokens = kinds("\"open");

    assert_eq!(tokens[0], TokenKind::Illegal);
    assert_eq!(tokens[1], TokenKind::Identifier);
}

#[test]
fn test_whitespace_handling() {
    let tokens = kinds("  \n\t  x  \r\n  ");

    assert_eq!(tokens, vec![TokenKind::Identifier, TokenKind::EOF]);
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_token_positions() {
    let source = "var x".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[1].span.end.0, 5);
}

#[test]
fn test_eof_repeats_once_exhausted() {
    let mut lexer = Lexer::new("x".to_string(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
}
