//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (decimal, hex, binary, separators)
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Comments
//! - Position tracking and unknown characters

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("mod let external fn type while if else return do end true false null"),
        vec![
            TokenKind::Mod,
            TokenKind::Let,
            TokenKind::External,
            TokenKind::Fn,
            TokenKind::Type,
            TokenKind::While,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::Do,
            TokenKind::End,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_1 _under endless Modular");

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar_1", "_under", "endless", "Modular", "EOF"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0x1F 0b101 1'000'000");

    assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Number));
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0x1F");
    assert_eq!(tokens[2].value, "0b101");
    assert_eq!(tokens[3].value, "1'000'000");
}

#[test]
fn test_minus_is_not_part_of_number() {
    assert_eq!(
        kinds("n-1"),
        vec![TokenKind::Identifier, TokenKind::Dash, TokenKind::Number, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_strings_verbatim() {
    let tokens = tokenize(r#""hello\n" "say \"hi\"""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, r#""hello\n""#);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, r#""say \"hi\"""#);
}

#[test]
fn test_tokenize_longest_operator_wins() {
    assert_eq!(
        kinds("<<= << <= < >>= >> >= > == = != ! || |= | && &= & ^= ^ ~"),
        vec![
            TokenKind::ShiftLeftEquals,
            TokenKind::ShiftLeft,
            TokenKind::LessEquals,
            TokenKind::Less,
            TokenKind::ShiftRightEquals,
            TokenKind::ShiftRight,
            TokenKind::GreaterEquals,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::Assignment,
            TokenKind::NotEquals,
            TokenKind::Not,
            TokenKind::Or,
            TokenKind::PipeEquals,
            TokenKind::Pipe,
            TokenKind::And,
            TokenKind::AmpersandEquals,
            TokenKind::Ampersand,
            TokenKind::CaretEquals,
            TokenKind::Caret,
            TokenKind::Tilde,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) [ ] . ... ; : ? , -> += -= *= /= %="),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Ellipsis,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Question,
            TokenKind::Comma,
            TokenKind::Arrow,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("a // line comment\n/* block\n comment */ b"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("mod fib\n  fn f");

    assert_eq!(tokens[1].span.start.line, 0);
    assert_eq!(tokens[1].span.start.column, 4);
    assert_eq!(tokens[1].span.end.offset, 7);

    assert_eq!(tokens[2].kind, TokenKind::Fn);
    assert_eq!(tokens[2].span.start.line, 1);
    assert_eq!(tokens[2].span.start.column, 2);
    assert_eq!(tokens[2].span.start.offset, 10);
}

#[test]
fn test_unknown_character_becomes_token() {
    let tokens = tokenize("let @ x");

    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_empty_source_yields_eof() {
    let tokens = tokenize("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}
