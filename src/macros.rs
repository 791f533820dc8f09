//! Token construction shorthands for the lexer's pattern table.
//!
//! Patterns are anchored at the cursor (`^(?:...)`), so a handler always
//! consumes from the current position; `Lexer::span_for` turns a match
//! length into the token's span before the cursor moves.

/// `Token { kind, value, span }`.
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Handler for a fixed-text token: pushes `$kind` spanning `$value` and
/// steps the cursor past it.
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let span = lexer.span_for($value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
        }
    };
}
