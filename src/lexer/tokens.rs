use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("mod", TokenKind::Mod);
        map.insert("let", TokenKind::Let);
        map.insert("external", TokenKind::External);
        map.insert("fn", TokenKind::Fn);
        map.insert("type", TokenKind::Type);
        map.insert("while", TokenKind::While);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map.insert("do", TokenKind::Do);
        map.insert("end", TokenKind::End);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Unknown,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=
    Tilde,      // ~

    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,

    Or,
    And,
    Pipe,
    Ampersand,
    Caret,

    Dot,
    Ellipsis,
    Semicolon,
    Colon,
    Question,
    Comma,
    Arrow,

    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    ShiftLeftEquals,
    ShiftRightEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Mod,
    Let,
    External,
    Fn,
    Type,
    While,
    If,
    Else,
    Return,
    Do,
    End,
    True,
    False,
    Null,
}

impl TokenKind {
    /// The node type tag this token carries in the concrete syntax tree.
    ///
    /// Punctuation, operators and keywords are tagged with their own text,
    /// the way anonymous nodes are in a tree-sitter grammar.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Unknown => "ERROR",
            TokenKind::Number => "number_literal",
            TokenKind::String => "string_literal",
            TokenKind::Identifier => "ident",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Tilde => "~",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Pipe => "|",
            TokenKind::Ampersand => "&",
            TokenKind::Caret => "^",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Comma => ",",
            TokenKind::Arrow => "->",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::StarEquals => "*=",
            TokenKind::SlashEquals => "/=",
            TokenKind::PercentEquals => "%=",
            TokenKind::ShiftLeftEquals => "<<=",
            TokenKind::ShiftRightEquals => ">>=",
            TokenKind::AmpersandEquals => "&=",
            TokenKind::PipeEquals => "|=",
            TokenKind::CaretEquals => "^=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Mod => "mod",
            TokenKind::Let => "let",
            TokenKind::External => "external",
            TokenKind::Fn => "fn",
            TokenKind::Type => "type",
            TokenKind::While => "while",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Do => "do",
            TokenKind::End => "end",
            TokenKind::True => "true_lit",
            TokenKind::False => "false_lit",
            TokenKind::Null => "null_lit",
        }
    }

    /// Whether the token becomes a named node in the syntax tree.
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
