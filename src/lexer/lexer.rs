use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // Every pattern is anchored so a match always starts at the cursor
        regex: Regex::new(&format!("^(?:{})", regex)).unwrap(),
        handler,
    }
}

lazy_static! {
    // Longer operators must come before their prefixes
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("0[xX][0-9a-fA-F]+(?:'[0-9a-fA-F]+)*|0[bB][01]+(?:'[01]+)*|[0-9]+(?:'[0-9]+)*", number_handler),
        pattern("\\s+", skip_handler),
        pattern("\"(?:[^\"\\\\\\n]|\\\\.)*\"", string_handler),
        pattern("//[^\\n]*", skip_handler),
        pattern("/\\*[^*]*\\*+(?:[^/*][^*]*\\*+)*/", skip_handler),
        pattern("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("<<=", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals, "<<=")),
        pattern("<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">>=", MK_DEFAULT_HANDLER!(TokenKind::ShiftRightEquals, ">>=")),
        pattern(">>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("\\|=", MK_DEFAULT_HANDLER!(TokenKind::PipeEquals, "|=")),
        pattern("\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("&=", MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals, "&=")),
        pattern("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("\\^=", MK_DEFAULT_HANDLER!(TokenKind::CaretEquals, "^=")),
        pattern("\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
        pattern("\\.\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...")),
        pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern("\\?", MK_DEFAULT_HANDLER!(TokenKind::Question, "?")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        pattern("\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern("-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern("\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern("/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern("%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 0,
            column: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.pos)
    }

    /// Span of the next `len` bytes, starting at the cursor.
    pub fn span_for(&self, len: usize) -> Span {
        let mut end = self.position();
        for ch in self.source[self.pos..self.pos + len].chars() {
            end = step(end, ch);
        }

        Span {
            start: self.position(),
            end,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        let end = self.span_for(n).end;
        self.pos = end.offset;
        self.line = end.line;
        self.column = end.column;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map(|m| m.end()).unwrap_or(0)
    }
}

fn step(position: Position, ch: char) -> Position {
    if ch == '\n' {
        Position::new(position.line + 1, 0, position.offset + 1)
    } else {
        Position::new(
            position.line,
            position.column + ch.len_utf8(),
            position.offset + ch.len_utf8(),
        )
    }
}

fn push_matched(lexer: &mut Lexer, kind: TokenKind, len: usize) {
    let value = lexer.remainder()[..len].to_string();
    let span = lexer.span_for(len);
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    push_matched(lexer, TokenKind::Number, len);
}

// String literals are kept verbatim, quotes and escapes included, since they
// are emitted into C unchanged.
fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    push_matched(lexer, TokenKind::String, len);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    let kind = RESERVED_LOOKUP
        .get(&lexer.remainder()[..len])
        .copied()
        .unwrap_or(TokenKind::Identifier);

    push_matched(lexer, kind, len);
}

/// Splits the source into tokens, always ending with an `EOF` token.
///
/// Characters no pattern recognises become `Unknown` tokens; the parser turns
/// them into an error node instead of failing here.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source.to_string());

    while !lex.at_eof() {
        let matched = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match matched {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                let len = lex.remainder().chars().next().map_or(1, char::len_utf8);
                push_matched(&mut lex, TokenKind::Unknown, len);
            }
        }
    }

    let span = lex.span_for(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    lex.tokens
}
